//! `fieldseal secret delete` — remove a secret from the store.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_manager, Cli};
use crate::config::Settings;
use crate::errors::{FieldSealError, Result};

/// Execute the `secret delete` command.
pub fn execute(cli: &Cli, settings: &Settings, key: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete secret '{key}'?"))
            .default(false)
            .interact()
            .map_err(|e| FieldSealError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut manager = open_manager(cli, settings)?;
    manager.delete_secret(key)?;

    output::success(&format!("Deleted secret '{key}'"));

    Ok(())
}
