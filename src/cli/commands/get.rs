//! `fieldseal secret get` — retrieve and print a single secret's value.

use zeroize::Zeroizing;

use crate::cli::{open_manager, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `secret get` command.
pub fn execute(cli: &Cli, settings: &Settings, key: &str) -> Result<()> {
    let mut manager = open_manager(cli, settings)?;

    // Decrypt and print the secret value to stdout.
    let value = Zeroizing::new(manager.get_secret(key)?);
    println!("{}", value.as_str());

    Ok(())
}
