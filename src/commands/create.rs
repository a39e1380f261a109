use anyhow::{Context, Result};
use aws_smithy_types::date_time::Format;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::{
    aws::SharedCredentialsContext,
    config::{self, SessionParameters, SubProfiles},
    constants::{self, DEFAULT_AWS_REGION, DEFAULT_SESSION_DURATION_HOURS},
    error::ConfigError,
    mfa::TerminalTokenProvider,
    session::{BatchReport, RunOutcome, SessionOrchestrator},
};

#[derive(Debug, Clone, Args)]
pub struct CreateCommand {
    #[command(subcommand)]
    pub provider: CreateProvider,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CreateProvider {
    #[command(
        about = "Create new AWS sessions",
        long_about = "Assume one role per sub-profile with MFA and append the STS credentials to your output file (default $HOME/.aws/config-sessioner)"
    )]
    Aws(AwsSessionCommand),
}

impl CreateCommand {
    pub async fn execute(self) -> Result<RunOutcome> {
        match self.provider {
            CreateProvider::Aws(cmd) => cmd.execute().await,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AwsSessionCommand {
    #[arg(
        short = 'p',
        long,
        help = "Profile holding your AWS root credentials in the source file"
    )]
    pub session_profile: String,

    #[arg(short = 'm', long, help = "AWS MFA device serial (ARN)")]
    pub mfa_serial: String,

    #[arg(
        short = 'c',
        long,
        value_name = "NAME=ROLE_ARN",
        value_delimiter = ',',
        value_parser = parse_sub_profile_arg,
        help = "Sub-profiles to create, each sourcing STS credentials from a role"
    )]
    pub sub_profiles: Vec<(String, String)>,

    #[arg(
        short = 'd',
        long,
        default_value_t = DEFAULT_SESSION_DURATION_HOURS,
        allow_negative_numbers = true,
        help = "Expiry duration of the STS credentials in hours"
    )]
    pub session_duration: i64,

    #[arg(
        short = 's',
        long,
        help = "Source path for your root credentials [default: $HOME/.aws/credentials]"
    )]
    pub session_source: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        help = "Path to append STS credentials to [default: $HOME/.aws/config-sessioner]"
    )]
    pub session_output: Option<PathBuf>,

    #[arg(
        short = 'r',
        long,
        default_value = DEFAULT_AWS_REGION,
        help = "AWS region of the STS credentials"
    )]
    pub session_region: String,
}

fn parse_sub_profile_arg(entry: &str) -> Result<(String, String), ConfigError> {
    config::parse_sub_profile(entry)
}

impl AwsSessionCommand {
    pub async fn execute(self) -> Result<RunOutcome> {
        let params = self.session_parameters()?;
        let profiles = SubProfiles::from_pairs(self.sub_profiles)
            .context("Invalid --sub-profiles")?;

        info!(
            "Creating {} AWS sessions from profile '{}'",
            profiles.len(),
            params.source_profile
        );

        let orchestrator =
            SessionOrchestrator::new(&params, SharedCredentialsContext::new(), TerminalTokenProvider);
        let report = orchestrator
            .run(&profiles)
            .await
            .context("Session aborted before any profile was attempted")?;

        print_report(&report, &params);
        Ok(report.outcome())
    }

    fn session_parameters(&self) -> Result<SessionParameters> {
        let source_path = match &self.session_source {
            Some(path) => path.clone(),
            None => constants::get_aws_credentials_path()
                .context("Failed to determine AWS credentials path")?,
        };

        let output_path = match &self.session_output {
            Some(path) => path.clone(),
            None => constants::get_session_output_path()
                .context("Failed to determine session output path")?,
        };

        let params = SessionParameters {
            source_profile: self.session_profile.clone(),
            source_path,
            region: self.session_region.clone(),
            mfa_serial: self.mfa_serial.clone(),
            duration_hours: self.session_duration,
            output_path,
        };
        params.validate().context("Invalid session settings")?;

        Ok(params)
    }
}

fn print_report(report: &BatchReport, params: &SessionParameters) {
    for success in &report.succeeded {
        println!(
            "Profile '{}' saved (access key {}, expires {})",
            success.profile,
            success.access_key_id,
            success
                .expiration
                .fmt(Format::DateTime)
                .unwrap_or_else(|_| "unknown".to_string())
        );
    }

    for failed in &report.failed {
        eprintln!("Profile '{}' failed: {}", failed.profile, failed.failure.describe());
    }

    println!(
        "\n{} of {} profiles appended to {}",
        report.succeeded.len(),
        report.succeeded.len() + report.failed.len(),
        params.output_path.display()
    );
}
