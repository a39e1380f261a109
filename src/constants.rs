use std::{env, path::PathBuf};

use dirs;

/// Name the binary is installed under, used in completion scripts
pub const BIN_NAME: &str = "sessioner";

/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS shared credentials file name
pub const AWS_CREDENTIALS_FILE_NAME: &str = "credentials";

/// File the issued session profiles are appended to
pub const SESSION_OUTPUT_FILE_NAME: &str = "config-sessioner";

/// Default AWS region for STS operations
pub const DEFAULT_AWS_REGION: &str = "eu-west-1";

/// Default session duration in hours
pub const DEFAULT_SESSION_DURATION_HOURS: i64 = 1;

/// Prefix of the role session name sent with every AssumeRole call
pub const ROLE_SESSION_NAME_PREFIX: &str = "sessioner";

fn home_dir() -> Option<PathBuf> {
    dirs::home_dir().or_else(|| {
        // Fallback to environment variables if dirs crate fails
        env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from)
    })
}

/// Get the AWS credentials file path
/// Respects AWS_SHARED_CREDENTIALS_FILE environment variable if set
pub fn get_aws_credentials_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("AWS_SHARED_CREDENTIALS_FILE") {
        return Some(PathBuf::from(path));
    }

    home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(AWS_CREDENTIALS_FILE_NAME))
}

/// Get the default output path: ~/.aws/config-sessioner
pub fn get_session_output_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(AWS_CONFIG_DIR_NAME).join(SESSION_OUTPUT_FILE_NAME))
}
