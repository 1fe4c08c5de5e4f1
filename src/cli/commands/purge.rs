//! `fieldseal secret purge` — delete expired secrets.

use crate::cli::output;
use crate::cli::{open_manager, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `secret purge` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let mut manager = open_manager(cli, settings)?;

    match manager.purge_expired()? {
        0 => output::info("No expired secrets."),
        n => output::success(&format!("Purged {n} expired secret(s)")),
    }

    Ok(())
}
