//! Shell completion generation.

use std::io;

use anyhow::Result;
use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SupportedShell {
    Bash,
    Zsh,
}

impl SupportedShell {
    fn as_complete_shell(self) -> Shell {
        match self {
            SupportedShell::Bash => Shell::Bash,
            SupportedShell::Zsh => Shell::Zsh,
        }
    }
}

/// Write the completion script for `shell` to stdout.
pub fn generate_completions(shell: SupportedShell) -> Result<()> {
    let mut command = crate::Cli::command();
    generate(
        shell.as_complete_shell(),
        &mut command,
        "chocsync",
        &mut io::stdout(),
    );
    Ok(())
}
