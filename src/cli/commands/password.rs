//! `fieldseal password hash|verify` — Argon2id password hashes.

use crate::cli::{output, read_value};
use crate::crypto::{hash_password, verify_password};
use crate::errors::{FieldSealError, Result};

/// Execute the `password hash` command.
pub fn execute_hash() -> Result<()> {
    let password = read_value(None, "Password")?;
    if password.is_empty() {
        return Err(FieldSealError::CommandFailed(
            "password cannot be empty".into(),
        ));
    }
    println!("{}", hash_password(&password)?);
    Ok(())
}

/// Execute the `password verify` command. A wrong password is reported as
/// an error so the process exits non-zero.
pub fn execute_verify(hash: &str) -> Result<()> {
    let password = read_value(None, "Password")?;
    if verify_password(&password, hash)? {
        output::success("Password matches.");
        Ok(())
    } else {
        Err(FieldSealError::CommandFailed(
            "password does not match".into(),
        ))
    }
}
