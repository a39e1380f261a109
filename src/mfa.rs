use dialoguer::{Input, theme::ColorfulTheme};

use crate::error::MfaError;

/// Source of the current one-time MFA code.
///
/// Called once per role assumption, at the moment the exchange runs.
pub trait MfaTokenProvider {
    fn token_code(&self, serial: &str) -> Result<String, MfaError>;
}

/// Prompts for the MFA code on the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalTokenProvider;

impl MfaTokenProvider for TerminalTokenProvider {
    fn token_code(&self, serial: &str) -> Result<String, MfaError> {
        let theme = ColorfulTheme::default();

        Input::<String>::with_theme(&theme)
            .with_prompt(format!("MFA code for {serial}"))
            .validate_with(|input: &String| {
                if is_valid_token_code(input) {
                    Ok(())
                } else {
                    Err("MFA code must be 6 digits")
                }
            })
            .interact_text()
            .map(|code| code.trim().to_string())
            .map_err(|e| MfaError::Read {
                serial: serial.to_string(),
                message: e.to_string(),
            })
    }
}

/// Returns the same code for every exchange
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    code: String,
}

impl StaticTokenProvider {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl MfaTokenProvider for StaticTokenProvider {
    fn token_code(&self, _serial: &str) -> Result<String, MfaError> {
        Ok(self.code.clone())
    }
}

fn is_valid_token_code(code: &str) -> bool {
    let code = code.trim();
    code.len() == 6 && code.chars().all(|c| c.is_ascii_digit())
}
