//! `fieldseal secret list` — display all secrets in a table.

use crate::cli::output;
use crate::cli::{open_manager, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `secret list` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let manager = open_manager(cli, settings)?;

    let secrets = manager.list_secrets()?;

    output::info(&format!(
        "{} store — {} secret(s)",
        manager.backend_kind(),
        secrets.len()
    ));

    output::print_secrets_table(&secrets);

    Ok(())
}
