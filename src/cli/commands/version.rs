//! `fieldseal version` — display version and build features.

use console::style;

use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("fieldseal {current}");

    let keyring = if cfg!(feature = "keyring-store") {
        style("enabled").green()
    } else {
        style("disabled").dim()
    };
    println!("  keyring backend: {keyring}");

    Ok(())
}
