use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::{
    commands::{CompletionsCommand, CreateCommand},
    session::RunOutcome,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "sessioner", version, about = "Create MFA-backed AWS STS sessions for several profiles at once", long_about = None)]
pub struct Cli {
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase verbosity (-v info, -vv debug, -vvv trace)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Create a new session and append the config")]
    Create(CreateCommand),
    #[command(about = "Generate shell completion scripts for sessioner")]
    Completions(CompletionsCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<RunOutcome> {
        match self.command {
            Commands::Create(cmd) => cmd.execute().await,
            Commands::Completions(cmd) => {
                cmd.execute();
                Ok(RunOutcome::Succeeded)
            }
        }
    }
}
