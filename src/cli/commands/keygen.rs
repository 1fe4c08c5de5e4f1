//! `fieldseal keygen` — print a fresh master key.

use crate::cli::output;
use crate::crypto::kdf::generate_master_key_b64;
use crate::crypto::MASTER_KEY_ENV;
use crate::errors::Result;

/// Execute the `keygen` command.
pub fn execute() -> Result<()> {
    println!("{}", generate_master_key_b64());
    output::tip(&format!(
        "Export it as {MASTER_KEY_ENV}; data sealed under one key cannot be read with another."
    ));
    Ok(())
}
