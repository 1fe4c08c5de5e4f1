//! High-level secret operations used by CLI commands.
//!
//! `SecretsManager` seals values with a `FieldCipher` before handing them
//! to a `SecretBackend`, and enforces expiry and last-access bookkeeping
//! so that the backends stay simple key/value stores.

use chrono::{Duration, Utc};

use super::backend::SecretBackend;
use super::secret::{SecretMetadata, SecretRecord};
use crate::crypto::FieldCipher;
use crate::errors::{FieldSealError, Result};

/// Longest accepted secret name.
const MAX_NAME_LEN: usize = 128;

/// The main secrets handle.
pub struct SecretsManager {
    cipher: FieldCipher,
    backend: Box<dyn SecretBackend>,
    default_ttl: Option<Duration>,
}

impl SecretsManager {
    pub fn new(cipher: FieldCipher, backend: Box<dyn SecretBackend>) -> Self {
        Self {
            cipher,
            backend,
            default_ttl: None,
        }
    }

    /// Apply `ttl` to secrets written without an explicit lifetime.
    pub fn with_default_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Backend name, for display.
    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    // ------------------------------------------------------------------
    // Secret operations
    // ------------------------------------------------------------------

    /// Add or update a secret.
    ///
    /// `ttl` overrides the default lifetime. On update the original
    /// `created_at` is preserved. Returns `true` if a secret was replaced.
    pub fn set_secret(&mut self, name: &str, value: &str, ttl: Option<Duration>) -> Result<bool> {
        validate_secret_name(name)?;

        let now = Utc::now();
        let expires_at = match ttl.or(self.default_ttl) {
            Some(d) => Some(
                now.checked_add_signed(d)
                    .ok_or_else(|| FieldSealError::InvalidTtl(format!("{} days", d.num_days())))?,
            ),
            None => None,
        };

        let sealed_value = self.cipher.encrypt(value)?;
        let existing = self.backend.load(name)?;

        let record = SecretRecord {
            name: name.to_string(),
            sealed_value,
            created_at: existing.as_ref().map_or(now, |r| r.created_at),
            updated_at: now,
            last_accessed_at: existing.as_ref().and_then(|r| r.last_accessed_at),
            expires_at,
        };

        self.backend.save(&record)?;
        tracing::info!(secret = name, backend = self.backend.kind(), "secret stored");
        Ok(existing.is_some())
    }

    /// Decrypt and return a secret's value.
    ///
    /// Fails with `SecretExpired` once the expiry has passed. A successful
    /// read updates `last_accessed_at`.
    pub fn get_secret(&mut self, name: &str) -> Result<String> {
        validate_secret_name(name)?;

        let record = self
            .backend
            .load(name)?
            .ok_or_else(|| FieldSealError::SecretNotFound(name.to_string()))?;

        let now = Utc::now();
        if record.is_expired_at(now) {
            return Err(FieldSealError::SecretExpired(name.to_string()));
        }

        let value = self.cipher.decrypt(&record.sealed_value)?;
        self.backend.touch(name, now)?;
        Ok(value)
    }

    /// Remove a secret.
    pub fn delete_secret(&mut self, name: &str) -> Result<()> {
        validate_secret_name(name)?;
        if !self.backend.remove(name)? {
            return Err(FieldSealError::SecretNotFound(name.to_string()));
        }
        tracing::info!(secret = name, "secret deleted");
        Ok(())
    }

    /// Metadata for all secrets, sorted by name.
    pub fn list_secrets(&self) -> Result<Vec<SecretMetadata>> {
        let mut list: Vec<SecretMetadata> = self
            .backend
            .list()?
            .iter()
            .map(SecretRecord::metadata)
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    /// Delete every expired secret. Returns how many were removed.
    pub fn purge_expired(&mut self) -> Result<usize> {
        let now = Utc::now();
        let expired: Vec<String> = self
            .backend
            .list()?
            .into_iter()
            .filter(|r| r.is_expired_at(now))
            .map(|r| r.name)
            .collect();

        let mut removed = 0;
        for name in &expired {
            if self.backend.remove(name)? {
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!(count = removed, "purged expired secrets");
        }
        Ok(removed)
    }

    /// Returns `true` if a secret with `name` exists, expired or not.
    ///
    /// This is a metadata-only check; nothing is decrypted.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.backend.load(name)?.is_some())
    }
}

/// Validate that a secret name is safe.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 128 characters.
pub fn validate_secret_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.');

    if ok {
        Ok(())
    } else {
        Err(FieldSealError::InvalidSecretName(name.to_string()))
    }
}
