//! `fieldseal completions` — generate shell completion scripts.
//!
//! Usage:
//!   fieldseal completions bash > ~/.bash_completion.d/fieldseal
//!   fieldseal completions zsh

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    write_completions(shell, &mut io::stdout())
}

fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "fieldseal", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("fieldseal"));
        assert!(script.contains("verify-hash"));
    }

    #[test]
    fn every_supported_shell_generates_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut buf = Vec::new();
            write_completions(shell, &mut buf).unwrap();
            assert!(!buf.is_empty(), "{shell} produced no output");
        }
    }
}
