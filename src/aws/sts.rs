use aws_sdk_sts::{
    Client as StsClient,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::assume_role::AssumeRoleError as StsAssumeRoleError,
};
use chrono::Utc;
use std::fmt;
use tracing::{debug, info};

use super::Credentials;
use crate::{constants::ROLE_SESSION_NAME_PREFIX, error::AssumeRoleError, mfa::MfaTokenProvider};

/// One MFA-authenticated `AssumeRole` call
#[derive(Clone)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub role_session_name: String,
    pub serial_number: String,
    pub token_code: String,
    pub duration_seconds: i32,
}

impl fmt::Debug for AssumeRoleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssumeRoleRequest")
            .field("role_arn", &self.role_arn)
            .field("role_session_name", &self.role_session_name)
            .field("serial_number", &self.serial_number)
            .field("token_code", &"** redacted **")
            .field("duration_seconds", &self.duration_seconds)
            .finish()
    }
}

/// The security-token service that trades an MFA code for role credentials
pub trait TokenService {
    fn assume_role(
        &self,
        request: AssumeRoleRequest,
    ) -> impl Future<Output = Result<Credentials, AssumeRoleError>> + Send;
}

/// `TokenService` backed by AWS STS
#[derive(Debug, Clone)]
pub struct StsTokenService {
    client: StsClient,
}

impl StsTokenService {
    pub fn new(client: StsClient) -> Self {
        Self { client }
    }
}

impl TokenService for StsTokenService {
    async fn assume_role(&self, request: AssumeRoleRequest) -> Result<Credentials, AssumeRoleError> {
        info!("Calling AWS STS AssumeRole");
        debug!("Role ARN: {}", request.role_arn);
        debug!("MFA serial: {}", request.serial_number);
        debug!("Duration: {} seconds", request.duration_seconds);

        let response = self
            .client
            .assume_role()
            .role_arn(request.role_arn)
            .role_session_name(request.role_session_name)
            .serial_number(request.serial_number)
            .token_code(request.token_code)
            .duration_seconds(request.duration_seconds)
            .send()
            .await
            .map_err(service_error)?;

        let sts_creds = response
            .credentials()
            .ok_or(AssumeRoleError::MissingCredentials)?;

        Ok(Credentials {
            access_key_id: sts_creds.access_key_id().to_string(),
            secret_access_key: sts_creds.secret_access_key().to_string(),
            session_token: sts_creds.session_token().to_string(),
            expiration: *sts_creds.expiration(),
        })
    }
}

fn service_error(err: SdkError<StsAssumeRoleError>) -> AssumeRoleError {
    let code = err.code().unwrap_or("RequestFailed").to_string();
    let message = err
        .message()
        .map(String::from)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

    AssumeRoleError::Service { code, message }
}

/// Assumes roles with a fixed MFA device, asking for a fresh code on every call
pub struct MfaRoleAssumer<'a, S, M> {
    service: &'a S,
    mfa: &'a M,
    serial_number: &'a str,
    duration_seconds: i32,
}

impl<'a, S: TokenService, M: MfaTokenProvider> MfaRoleAssumer<'a, S, M> {
    /// `duration_seconds` must already be range-checked for STS
    pub fn new(service: &'a S, mfa: &'a M, serial_number: &'a str, duration_seconds: i32) -> Self {
        Self {
            service,
            mfa,
            serial_number,
            duration_seconds,
        }
    }

    /// Perform exactly one `AssumeRole` exchange for `role_arn`
    pub async fn assume(&self, role_arn: &str) -> Result<Credentials, AssumeRoleError> {
        // Read at call time: STS may refuse a code already used for another role.
        let token_code = self.mfa.token_code(self.serial_number)?;

        let request = AssumeRoleRequest {
            role_arn: role_arn.to_string(),
            role_session_name: role_session_name(),
            serial_number: self.serial_number.to_string(),
            token_code,
            duration_seconds: self.duration_seconds,
        };

        self.service.assume_role(request).await
    }
}

fn role_session_name() -> String {
    format!(
        "{}-{}",
        ROLE_SESSION_NAME_PREFIX,
        Utc::now().timestamp_millis()
    )
}
