use aws_config::{
    BehaviorVersion, Region,
    profile::{
        ProfileFileCredentialsProvider,
        profile_file::{ProfileFileKind, ProfileFiles},
    },
};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_sts::Client as StsClient;
use std::path::Path;
use tracing::{debug, info};

use super::{StsTokenService, TokenService};
use crate::{config::SessionParameters, error::ContextError};

/// Establishes the authenticated context every role assumption runs against
pub trait SessionContextBuilder {
    type Service: TokenService;

    fn build(
        &self,
        params: &SessionParameters,
    ) -> impl Future<Output = Result<Self::Service, ContextError>> + Send;
}

/// Builds an STS client from a named profile, resolved the way the AWS SDK does.
///
/// The source file takes the place of the shared credentials file. Static keys,
/// `credential_process`, SSO and `source_profile` chains all resolve.
#[derive(Debug, Clone, Copy)]
pub struct SharedCredentialsContext {
    include_default_config: bool,
}

impl SharedCredentialsContext {
    /// Also consult the shared config file (`~/.aws/config` or `AWS_CONFIG_FILE`)
    pub fn new() -> Self {
        Self {
            include_default_config: true,
        }
    }

    /// Resolve from the source file alone
    pub fn credentials_file_only() -> Self {
        Self {
            include_default_config: false,
        }
    }

    fn profile_files(&self, source_path: &Path) -> ProfileFiles {
        ProfileFiles::builder()
            .include_default_config_file(self.include_default_config)
            .with_file(ProfileFileKind::Credentials, source_path)
            .build()
    }
}

impl Default for SharedCredentialsContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContextBuilder for SharedCredentialsContext {
    type Service = StsTokenService;

    async fn build(&self, params: &SessionParameters) -> Result<StsTokenService, ContextError> {
        if !is_valid_region(&params.region) {
            return Err(ContextError::InvalidRegion {
                region: params.region.clone(),
            });
        }
        if !params.source_path.exists() {
            return Err(ContextError::SourceFileMissing {
                path: params.source_path.clone(),
            });
        }

        debug!(
            "Resolving profile '{}' from {}",
            params.source_profile,
            params.source_path.display()
        );
        let provider = SharedCredentialsProvider::new(
            ProfileFileCredentialsProvider::builder()
                .profile_files(self.profile_files(&params.source_path))
                .profile_name(&params.source_profile)
                .build(),
        );

        // Resolve once so a broken profile fails before the first MFA prompt.
        provider
            .provide_credentials()
            .await
            .map_err(|source| ContextError::Credentials {
                profile: params.source_profile.clone(),
                source,
            })?;

        let config = aws_config::defaults(BehaviorVersion::latest())
            .profile_files(self.profile_files(&params.source_path))
            .profile_name(&params.source_profile)
            .region(Region::new(params.region.clone()))
            .credentials_provider(provider)
            .load()
            .await;

        info!(
            "Using source profile '{}' in region {}",
            params.source_profile, params.region
        );
        Ok(StsTokenService::new(StsClient::new(&config)))
    }
}

/// Check that `region` looks like `eu-west-1` or `us-gov-west-1`
pub fn is_valid_region(region: &str) -> bool {
    let parts: Vec<&str> = region.split('-').collect();

    parts.len() >= 3
        && parts.iter().all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
        && parts
            .last()
            .is_some_and(|last| last.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    fn params(source_path: PathBuf, region: &str) -> SessionParameters {
        SessionParameters {
            source_profile: "root".to_string(),
            source_path,
            region: region.to_string(),
            mfa_serial: "arn:aws:iam::123456789012:mfa/user".to_string(),
            duration_hours: 1,
            output_path: PathBuf::from("/tmp/unused"),
        }
    }

    fn credentials_file(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("credentials");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_valid_region() {
        assert!(is_valid_region("eu-west-1"));
        assert!(is_valid_region("us-east-1"));
        assert!(is_valid_region("us-gov-west-1"));
        assert!(is_valid_region("ap-southeast-2"));
    }

    #[test]
    fn test_invalid_region() {
        assert!(!is_valid_region(""));
        assert!(!is_valid_region("eu-west"));
        assert!(!is_valid_region("EU-WEST-1"));
        assert!(!is_valid_region("eu--west-1"));
        assert!(!is_valid_region("eu-west-1a"));
        assert!(!is_valid_region("eu west 1"));
        assert!(!is_valid_region("eu_west_1"));
    }

    #[tokio::test]
    async fn test_build_rejects_invalid_region() {
        let result = SharedCredentialsContext::credentials_file_only()
            .build(&params(PathBuf::from("/nonexistent"), "mars"))
            .await;
        assert!(matches!(result, Err(ContextError::InvalidRegion { .. })));
    }

    #[tokio::test]
    async fn test_build_missing_source_file() {
        let dir = TempDir::new().unwrap();
        let result = SharedCredentialsContext::credentials_file_only()
            .build(&params(dir.path().join("absent"), "eu-west-1"))
            .await;
        assert!(matches!(result, Err(ContextError::SourceFileMissing { .. })));
    }

    #[tokio::test]
    async fn test_build_missing_profile() {
        let dir = TempDir::new().unwrap();
        let path = credentials_file(
            &dir,
            "[default]\naws_access_key_id=A\naws_secret_access_key=B\n",
        );

        let result = SharedCredentialsContext::credentials_file_only()
            .build(&params(path, "eu-west-1"))
            .await;
        assert!(matches!(
            result,
            Err(ContextError::Credentials { ref profile, .. }) if profile == "root"
        ));
    }

    #[tokio::test]
    async fn test_build_with_static_keys() {
        let dir = TempDir::new().unwrap();
        let path = credentials_file(
            &dir,
            "[root]\naws_access_key_id=A\naws_secret_access_key=B\n",
        );

        let result = SharedCredentialsContext::credentials_file_only()
            .build(&params(path, "eu-west-1"))
            .await;
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_build_with_credential_process() {
        let dir = TempDir::new().unwrap();
        let path = credentials_file(
            &dir,
            "[root]\ncredential_process = echo '{\"Version\": 1, \"AccessKeyId\": \"AKIDPROCESS\", \"SecretAccessKey\": \"secret\"}'\n",
        );

        let result = SharedCredentialsContext::credentials_file_only()
            .build(&params(path, "eu-west-1"))
            .await;
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_build_surfaces_failing_credential_process() {
        let dir = TempDir::new().unwrap();
        let path = credentials_file(&dir, "[root]\ncredential_process = false\n");

        let result = SharedCredentialsContext::credentials_file_only()
            .build(&params(path, "eu-west-1"))
            .await;
        assert!(matches!(result, Err(ContextError::Credentials { .. })));
    }
}
