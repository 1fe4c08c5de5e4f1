//! `fieldseal secret set` — add or update a secret.

use chrono::Duration;

use crate::cli::output;
use crate::cli::{open_manager, read_value, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `secret set` command.
pub fn execute(
    cli: &Cli,
    settings: &Settings,
    key: &str,
    value: Option<&str>,
    ttl_days: Option<u32>,
) -> Result<()> {
    if value.is_some() {
        output::warning("Value provided on command line — it may appear in shell history.");
    }
    let secret_value = read_value(value, &format!("Enter value for {key}"))?;

    let mut manager = open_manager(cli, settings)?;

    let ttl = ttl_days.map(|d| Duration::days(i64::from(d)));
    let existed = manager.set_secret(key, &secret_value, ttl)?;

    if existed {
        output::success(&format!("Secret '{key}' updated"));
    } else {
        output::success(&format!(
            "Secret '{key}' added to {} store",
            manager.backend_kind()
        ));
    }

    Ok(())
}
