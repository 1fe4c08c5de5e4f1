//! `fieldseal hash` / `fieldseal verify-hash` — SHA-256 integrity hashes.

use crate::cli::output;
use crate::crypto::{compute_hash, verify_hash};
use crate::errors::{FieldSealError, Result};

/// Execute the `hash` command.
pub fn execute(value: &str) -> Result<()> {
    println!("{}", compute_hash(value));
    Ok(())
}

/// Execute the `verify-hash` command. A mismatch is reported as an error
/// so the process exits non-zero.
pub fn execute_verify(value: &str, expected: &str) -> Result<()> {
    if verify_hash(value, expected) {
        output::success("Hash matches.");
        Ok(())
    } else {
        Err(FieldSealError::CommandFailed("hash does not match".into()))
    }
}
