//! Store module — sealed secret storage.
//!
//! This module provides:
//! - `SecretRecord` and `SecretMetadata` types (`secret`)
//! - The `SecretBackend` storage trait (`backend`)
//! - A SQLite backend (`sqlite`) and, with `keyring-store`, an OS keyring backend (`keyring`)
//! - High-level `SecretsManager` with expiry and access tracking (`manager`)

pub mod backend;
#[cfg(feature = "keyring-store")]
pub mod keyring;
pub mod manager;
pub mod secret;
pub mod sqlite;

pub use backend::SecretBackend;
#[cfg(feature = "keyring-store")]
pub use self::keyring::KeyringBackend;
pub use manager::{validate_secret_name, SecretsManager};
pub use secret::{SecretMetadata, SecretRecord};
pub use sqlite::SqliteBackend;
