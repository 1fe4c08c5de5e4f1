//! Plain SHA-256 integrity hashes.
//!
//! These are for change detection on non-secret values. The comparison in
//! `verify_hash` is an ordinary string equality, not constant-time; use
//! `FieldCipher` when the value being checked is secret.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Return the base64-encoded SHA-256 digest of `input`.
pub fn compute_hash(input: &str) -> String {
    BASE64.encode(Sha256::digest(input.as_bytes()))
}

/// Check `input` against a hash previously returned by `compute_hash`.
pub fn verify_hash(input: &str, expected_hash: &str) -> bool {
    compute_hash(input) == expected_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_of_empty_string_matches_known_digest() {
        assert_eq!(
            compute_hash(""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn hash_of_abc_matches_known_digest() {
        assert_eq!(
            compute_hash("abc"),
            "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
    }

    #[test]
    fn verify_hash_accepts_matching_input() {
        let h = compute_hash("order-1042");
        assert!(verify_hash("order-1042", &h));
    }

    #[test]
    fn verify_hash_rejects_other_input() {
        let h = compute_hash("order-1042");
        assert!(!verify_hash("order-1043", &h));
    }

    #[test]
    fn verify_hash_is_case_sensitive() {
        let h = compute_hash("value");
        assert!(!verify_hash("value", &h.to_lowercase()));
    }
}
