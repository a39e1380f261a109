use std::{io, path::PathBuf};

use aws_credential_types::provider::error::CredentialsError;
use thiserror::Error;

/// Invalid session settings, detected before any STS exchange is attempted.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Session duration must be at least 1 hour, got {hours}")]
    NonPositiveDuration { hours: i64 },
    #[error("Session duration of {hours} hours does not fit in an STS request")]
    DurationOutOfRange { hours: i64 },
    #[error("`{field}` must not be empty")]
    EmptyField { field: &'static str },
    #[error("No sub-profiles were given")]
    NoSubProfiles,
    #[error("Sub-profile entry `{entry}` is not of the form NAME=ROLE_ARN")]
    MalformedSubProfile { entry: String },
    #[error("Sub-profile `{profile}` was given more than once")]
    DuplicateSubProfile { profile: String },
}

/// Failure to establish the base STS context. Fatal to the whole run.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Credentials file {path} does not exist")]
    SourceFileMissing { path: PathBuf },
    #[error("Could not resolve credentials for source profile '{profile}'")]
    Credentials {
        profile: String,
        #[source]
        source: CredentialsError,
    },
    #[error("Region '{region}' is not a valid AWS region identifier")]
    InvalidRegion { region: String },
}

/// Failure to read the MFA code from its provider.
#[derive(Debug, Error)]
pub enum MfaError {
    #[error("Failed to read MFA code for {serial}: {message}")]
    Read { serial: String, message: String },
}

/// Failure of a single role assumption. Scoped to one sub-profile.
#[derive(Debug, Error)]
pub enum AssumeRoleError {
    #[error(transparent)]
    Mfa(#[from] MfaError),
    #[error("{code}: {message}")]
    Service { code: String, message: String },
    #[error("AWS STS returned no credentials")]
    MissingCredentials,
}

/// Failure to persist an issued credential set. Scoped to one sub-profile.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that abort a session run before any profile is attempted.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Context(#[from] ContextError),
}
