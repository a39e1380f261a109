use aws_smithy_types::DateTime;
use std::{error::Error as _, process::ExitCode};
use thiserror::Error;
use tracing::info;

use crate::{
    aws::{
        MfaRoleAssumer, SessionContextBuilder,
        credentials::{append_profile_block, format_profile_block},
        duration,
    },
    config::{SessionParameters, SubProfiles},
    error::{AssumeRoleError, SessionError, WriteError},
    mfa::MfaTokenProvider,
};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every sub-profile was issued and saved
    Succeeded,
    /// At least one sub-profile failed; successes are kept
    PartialSuccess,
    /// No sub-profile was attempted
    Aborted,
}

impl RunOutcome {
    /// Process status: 0 all saved, 1 aborted, 3 some profiles failed
    pub fn code(self) -> u8 {
        match self {
            Self::Succeeded => 0,
            Self::Aborted => 1,
            Self::PartialSuccess => 3,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// A sub-profile whose credentials were issued and written
#[derive(Debug, Clone)]
pub struct ProfileSuccess {
    pub profile: String,
    pub access_key_id: String,
    pub expiration: DateTime,
}

/// Why a sub-profile produced no block
#[derive(Debug, Error)]
pub enum ProfileFailure {
    #[error("role assumption failed")]
    AssumeRole(#[source] AssumeRoleError),
    #[error("credentials {access_key_id} were issued but not saved")]
    NotSaved {
        access_key_id: String,
        #[source]
        source: WriteError,
    },
}

impl ProfileFailure {
    /// This failure followed by each of its causes, joined with `: `
    pub fn describe(&self) -> String {
        let mut text = self.to_string();
        let mut cause = self.source();
        while let Some(err) = cause {
            text.push_str(": ");
            text.push_str(&err.to_string());
            cause = err.source();
        }
        text
    }
}

#[derive(Debug)]
pub struct FailedProfile {
    pub profile: String,
    pub failure: ProfileFailure,
}

/// Per-profile results of a completed run, in processing order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<ProfileSuccess>,
    pub failed: Vec<FailedProfile>,
}

impl BatchReport {
    pub fn outcome(&self) -> RunOutcome {
        if self.failed.is_empty() {
            RunOutcome::Succeeded
        } else {
            RunOutcome::PartialSuccess
        }
    }

    fn record_failure(&mut self, profile: &str, failure: ProfileFailure) {
        info!("Profile '{}' failed: {}", profile, failure.describe());
        self.failed.push(FailedProfile {
            profile: profile.to_string(),
            failure,
        });
    }
}

/// Drives one batch: one MFA-gated role assumption and one append per sub-profile
pub struct SessionOrchestrator<'a, B, M> {
    params: &'a SessionParameters,
    context: B,
    mfa: M,
}

impl<'a, B: SessionContextBuilder, M: MfaTokenProvider> SessionOrchestrator<'a, B, M> {
    pub fn new(params: &'a SessionParameters, context: B, mfa: M) -> Self {
        Self {
            params,
            context,
            mfa,
        }
    }

    /// Run every sub-profile in order.
    ///
    /// Configuration and context failures abort before any exchange. Per-profile
    /// failures are recorded in the report and do not stop the batch.
    pub async fn run(&self, profiles: &SubProfiles) -> Result<BatchReport, SessionError> {
        self.params.validate()?;
        let lifetime = duration::hours_to_duration(self.params.duration_hours)?;
        let duration_seconds = duration::duration_seconds(lifetime)?;

        let service = self.context.build(self.params).await?;
        let assumer =
            MfaRoleAssumer::new(&service, &self.mfa, &self.params.mfa_serial, duration_seconds);
        info!("Session context ready, {} sub-profiles to issue", profiles.len());

        let mut report = BatchReport::default();

        for (profile, role_arn) in profiles.iter() {
            info!("Assuming role {} for profile '{}'", role_arn, profile);

            let creds = match assumer.assume(role_arn).await {
                Ok(creds) => creds,
                Err(e) => {
                    report.record_failure(profile, ProfileFailure::AssumeRole(e));
                    continue;
                }
            };

            let block = format_profile_block(profile, &creds);
            if let Err(e) = append_profile_block(&self.params.output_path, &block).await {
                report.record_failure(
                    profile,
                    ProfileFailure::NotSaved {
                        access_key_id: creds.access_key_id,
                        source: e,
                    },
                );
                continue;
            }

            info!("Profile '{}' saved", profile);
            report.succeeded.push(ProfileSuccess {
                profile: profile.to_string(),
                access_key_id: creds.access_key_id,
                expiration: creds.expiration,
            });
        }

        Ok(report)
    }
}
