use std::path::Path;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, info};

use super::Credentials;
use crate::error::WriteError;

/// Render one credential set as a `[profile <name>]` block
pub fn format_profile_block(profile: &str, creds: &Credentials) -> String {
    format!(
        "\n[profile {}]\naws_access_key_id={}\naws_secret_access_key={}\naws_session_token={}\n",
        profile, creds.access_key_id, creds.secret_access_key, creds.session_token
    )
}

/// Append a rendered block to `path`, creating the file if needed.
///
/// The handle is opened and closed within this call and the data is synced
/// to disk before returning.
pub async fn append_profile_block(path: &Path, block: &str) -> Result<(), WriteError> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await.map_err(|source| WriteError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    };

    file.write_all(block.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;
    file.sync_all().await.map_err(write_err)?;

    debug!("Appended {} bytes to {}", block.len(), path.display());
    info!("Profile block written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_smithy_types::DateTime;
    use std::fs;
    use tempfile::TempDir;

    fn sample_credentials() -> Credentials {
        Credentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "secret1".to_string(),
            session_token: "token1".to_string(),
            expiration: DateTime::from_secs(1_700_000_000),
        }
    }

    #[test]
    fn test_format_profile_block() {
        let block = format_profile_block("dev", &sample_credentials());
        assert_eq!(
            block,
            "\n[profile dev]\naws_access_key_id=AKIDEXAMPLE\naws_secret_access_key=secret1\naws_session_token=token1\n"
        );
    }

    #[test]
    fn test_format_profile_block_does_not_escape_name() {
        let block = format_profile_block("team a]", &sample_credentials());
        assert!(block.starts_with("\n[profile team a]]\n"));
    }

    #[tokio::test]
    async fn test_append_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config-sessioner");

        append_profile_block(&path, "\n[profile a]\n").await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "\n[profile a]\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_append_creates_private_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config-sessioner");

        append_profile_block(&path, "\n[profile a]\n").await.unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[tokio::test]
    async fn test_append_preserves_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "[default]\nregion=eu-west-1\n").unwrap();

        append_profile_block(&path, "\n[profile a]\n").await.unwrap();
        append_profile_block(&path, "\n[profile b]\n").await.unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[default]\nregion=eu-west-1\n\n[profile a]\n\n[profile b]\n"
        );
    }

    #[tokio::test]
    async fn test_append_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("config");

        let result = append_profile_block(&path, "\n[profile a]\n").await;

        assert!(matches!(result, Err(WriteError::Open { .. })));
        assert!(!path.exists());
    }
}
