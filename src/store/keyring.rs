//! OS keyring secret storage.
//!
//! Each record is serialized to JSON and stored as the "password" of a
//! keyring entry under the `fieldseal` service:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! Keyrings cannot enumerate entries, so a separate index entry holds
//! the sorted list of secret names. The value inside each record is
//! still sealed by `FieldCipher`.

use std::collections::BTreeSet;

use super::backend::SecretBackend;
use super::secret::SecretRecord;
use crate::errors::{FieldSealError, Result};

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "fieldseal";

/// Entry holding the JSON list of stored names.
const INDEX_ENTRY: &str = "index";

/// Build a keyring entry key for a secret name.
fn entry_key(name: &str) -> String {
    format!("secret:{name}")
}

fn entry(key: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE_NAME, key)
        .map_err(|e| FieldSealError::KeyringError(format!("failed to create keyring entry: {e}")))
}

fn read(key: &str) -> Result<Option<String>> {
    match entry(key)?.get_password() {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(FieldSealError::KeyringError(format!(
            "failed to read from keyring: {e}"
        ))),
    }
}

fn write(key: &str, value: &str) -> Result<()> {
    entry(key)?
        .set_password(value)
        .map_err(|e| FieldSealError::KeyringError(format!("failed to write to keyring: {e}")))
}

fn delete(key: &str) -> Result<bool> {
    match entry(key)?.delete_credential() {
        Ok(()) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(FieldSealError::KeyringError(format!(
            "failed to delete from keyring: {e}"
        ))),
    }
}

/// Secret records stored in the operating system's credential store.
#[derive(Debug, Default)]
pub struct KeyringBackend;

impl KeyringBackend {
    pub fn new() -> Self {
        Self
    }

    fn index(&self) -> Result<BTreeSet<String>> {
        match read(INDEX_ENTRY)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| FieldSealError::SerializationError(format!("keyring index: {e}"))),
            None => Ok(BTreeSet::new()),
        }
    }

    fn write_index(&self, names: &BTreeSet<String>) -> Result<()> {
        let json = serde_json::to_string(names)
            .map_err(|e| FieldSealError::SerializationError(format!("keyring index: {e}")))?;
        write(INDEX_ENTRY, &json)
    }
}

impl SecretBackend for KeyringBackend {
    fn kind(&self) -> &'static str {
        "keyring"
    }

    fn load(&self, name: &str) -> Result<Option<SecretRecord>> {
        read(&entry_key(name))?
            .map(|json| {
                serde_json::from_str(&json).map_err(|e| {
                    FieldSealError::SerializationError(format!("keyring record '{name}': {e}"))
                })
            })
            .transpose()
    }

    fn save(&mut self, record: &SecretRecord) -> Result<()> {
        let json = serde_json::to_string(record)
            .map_err(|e| FieldSealError::SerializationError(format!("keyring record: {e}")))?;
        write(&entry_key(&record.name), &json)?;

        let mut names = self.index()?;
        if names.insert(record.name.clone()) {
            self.write_index(&names)?;
        }
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<bool> {
        let existed = delete(&entry_key(name))?;

        let mut names = self.index()?;
        if names.remove(name) {
            self.write_index(&names)?;
        }
        Ok(existed)
    }

    fn list(&self) -> Result<Vec<SecretRecord>> {
        let mut records = Vec::new();
        for name in self.index()? {
            match self.load(&name)? {
                Some(record) => records.push(record),
                None => tracing::warn!("keyring index lists '{name}' but no entry exists"),
            }
        }
        Ok(records)
    }
}
