//! Password hashing using Argon2id PHC strings.
//!
//! `hash_password` returns a self-describing string
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`) that carries its own
//! parameters and salt, so `verify_password` needs nothing else.
//!
//! `verify_password` also accepts BCrypt hashes (`$2a$`, `$2b$`, `$2x$`,
//! `$2y$`) written by older deployments. New hashes are always Argon2id.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use crate::errors::{FieldSealError, Result};

/// Length of the random salt in bytes.
const SALT_LEN: usize = 16;

/// Memory cost in KiB (19 MiB).
const MEMORY_KIB: u32 = 19_456;

/// Number of passes.
const ITERATIONS: u32 = 2;

/// Parallelism lanes.
const PARALLELISM: u32 = 1;

/// Modular-crypt prefixes of BCrypt hashes.
const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

fn hasher() -> Result<Argon2<'static>> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, None)
        .map_err(|e| FieldSealError::PasswordHashFailed(format!("invalid Argon2 params: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| FieldSealError::PasswordHashFailed(format!("salt encoding: {e}")))?;

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| FieldSealError::PasswordHashFailed(format!("hashing: {e}")))?;

    Ok(hash.to_string())
}

/// Check `password` against a PHC string from `hash_password` or a
/// BCrypt hash.
///
/// Returns `Ok(false)` for a wrong password and an error only when
/// `stored_hash` cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    if BCRYPT_PREFIXES.iter().any(|p| stored_hash.starts_with(p)) {
        return bcrypt::verify(password, stored_hash)
            .map_err(|e| FieldSealError::PasswordHashFailed(format!("malformed bcrypt hash: {e}")));
    }

    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| FieldSealError::PasswordHashFailed(format!("malformed hash: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(FieldSealError::PasswordHashFailed(format!(
            "verification: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_succeeds() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
    }

    #[test]
    fn wrong_password_is_false_not_error() {
        let hash = hash_password("correct horse").unwrap();
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("repeat").unwrap();
        let b = hash_password("repeat").unwrap();
        assert_ne!(a, b);
    }

    /// Cost-4 hashes of "correct horse" under each BCrypt prefix.
    const BCRYPT_HASHES: [&str; 3] = [
        "$2a$04$abcdefghijklmnopqrstuujydOTSfIH/d5oUHpsygqV5X9xJLQc6e",
        "$2b$04$abcdefghijklmnopqrstuujydOTSfIH/d5oUHpsygqV5X9xJLQc6e",
        "$2y$04$abcdefghijklmnopqrstuujydOTSfIH/d5oUHpsygqV5X9xJLQc6e",
    ];

    #[test]
    fn bcrypt_hashes_still_verify() {
        for hash in BCRYPT_HASHES {
            assert!(verify_password("correct horse", hash).unwrap(), "{hash}");
            assert!(!verify_password("battery staple", hash).unwrap(), "{hash}");
        }
    }

    #[test]
    fn truncated_bcrypt_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "$2b$04$tooshort"),
            Err(FieldSealError::PasswordHashFailed(_))
        ));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "not-a-phc-string"),
            Err(FieldSealError::PasswordHashFailed(_))
        ));
    }
}
