use clap::{Args, CommandFactory};
use clap_complete::Shell;
use std::io::{self, Write};

use crate::{cli::Cli, constants::BIN_NAME};

#[derive(Debug, Clone, Args)]
pub struct CompletionsCommand {
    #[arg(value_enum, help = "Target shell for completion script")]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub fn execute(self) {
        self.write_script(&mut io::stdout());
    }

    /// Write the completion script for `sessioner` and all its subcommands
    fn write_script(&self, out: &mut dyn Write) {
        clap_complete::generate(self.shell, &mut Cli::command(), BIN_NAME, out);
    }
}
