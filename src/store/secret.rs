//! `SecretRecord` and `SecretMetadata` types held by a secret backend.
//!
//! A record carries the sealed value (the base64 blob produced by
//! `FieldCipher::encrypt`) plus lifecycle timestamps. Backends persist
//! records as-is and never see plaintext.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single sealed secret as stored by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    /// The name of the secret (e.g. "stripe.api_key").
    pub name: String,

    /// `HMAC || IV || ciphertext`, base64-encoded.
    pub sealed_value: String,

    /// When this secret was first created.
    pub created_at: DateTime<Utc>,

    /// When this secret was last written.
    pub updated_at: DateTime<Utc>,

    /// When this secret was last read, if ever.
    #[serde(default)]
    pub last_accessed_at: Option<DateTime<Utc>>,

    /// After this instant the secret can no longer be read.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SecretRecord {
    /// Returns `true` if the record's expiry is at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }

    /// Strip the sealed value, keeping only timestamps.
    pub fn metadata(&self) -> SecretMetadata {
        SecretMetadata {
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_accessed_at: self.last_accessed_at,
            expires_at: self.expires_at,
        }
    }
}

/// Lightweight metadata about a secret (no sealed value).
///
/// Returned by `SecretsManager::list_secrets` so callers can display
/// names and timestamps without touching any ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: Option<DateTime<Utc>>) -> SecretRecord {
        let now = Utc::now();
        SecretRecord {
            name: "db.password".into(),
            sealed_value: "c2VhbGVk".into(),
            created_at: now,
            updated_at: now,
            last_accessed_at: None,
            expires_at,
        }
    }

    #[test]
    fn record_without_expiry_never_expires() {
        let r = record(None);
        assert!(!r.is_expired_at(Utc::now() + Duration::days(3650)));
    }

    #[test]
    fn record_expires_at_its_deadline() {
        let deadline = Utc::now();
        let r = record(Some(deadline));
        assert!(!r.is_expired_at(deadline - Duration::seconds(1)));
        assert!(r.is_expired_at(deadline));
    }

    #[test]
    fn json_roundtrip_tolerates_missing_optional_fields() {
        let json = r#"{
            "name": "k",
            "sealed_value": "v",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }"#;
        let r: SecretRecord = serde_json::from_str(json).unwrap();
        assert!(r.last_accessed_at.is_none());
        assert!(r.expires_at.is_none());
    }
}
