//! Storage seam for sealed secret records.

use chrono::{DateTime, Utc};

use super::secret::SecretRecord;
use crate::errors::Result;

/// Persists `SecretRecord`s keyed by name.
///
/// Implementations store sealed values verbatim; encryption and expiry
/// policy live in `SecretsManager`.
pub trait SecretBackend {
    /// Short name for display (e.g. "sqlite").
    fn kind(&self) -> &'static str;

    /// Fetch a record, or `None` if no secret has that name.
    fn load(&self, name: &str) -> Result<Option<SecretRecord>>;

    /// Insert or replace the record with `record.name`.
    fn save(&mut self, record: &SecretRecord) -> Result<()>;

    /// Remove a record. Returns `false` if it did not exist.
    fn remove(&mut self, name: &str) -> Result<bool>;

    /// All records, in no particular order.
    fn list(&self) -> Result<Vec<SecretRecord>>;

    /// Record a read at `at`.
    fn touch(&mut self, name: &str, at: DateTime<Utc>) -> Result<()> {
        if let Some(mut record) = self.load(name)? {
            record.last_accessed_at = Some(at);
            self.save(&record)?;
        }
        Ok(())
    }
}
