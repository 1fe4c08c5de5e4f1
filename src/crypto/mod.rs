//! Cryptographic primitives for FieldSeal.
//!
//! This module provides:
//! - AES-256-CBC + HMAC-SHA256 field encryption (`encryption`)
//! - Master-key acquisition from env or machine identity (`kdf`)
//! - PBKDF2 sub-key derivation (`keys`)
//! - SHA-256 integrity hashes (`hash`)
//! - Argon2id password hashing (`password`)

pub mod encryption;
pub mod hash;
pub mod kdf;
pub mod keys;
pub mod password;

pub use encryption::{FieldCipher, LegacyPolicy};
pub use hash::{compute_hash, verify_hash};
pub use kdf::{resolve_master_key, MasterKeySource, MASTER_KEY_ENV};
pub use keys::{derive_keys, DerivedKeyPair, MasterKey};
pub use password::{hash_password, verify_password};
