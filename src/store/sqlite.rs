//! SQLite-backed secret storage.
//!
//! One row per secret in a `secrets` table. Timestamps are RFC 3339
//! text so the file stays readable with the `sqlite3` shell; the value
//! column only ever holds sealed blobs.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::backend::SecretBackend;
use super::secret::SecretRecord;
use crate::errors::{FieldSealError, Result};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS secrets (
    name             TEXT PRIMARY KEY NOT NULL,
    sealed_value     TEXT NOT NULL,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL,
    last_accessed_at TEXT,
    expires_at       TEXT
);";

const COLUMNS: &str = "name, sealed_value, created_at, updated_at, last_accessed_at, expires_at";

/// Secret records stored in a SQLite database.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (or create) the database at `path`.
    ///
    /// Missing parent directories are created. On Unix the file is
    /// restricted to owner read/write.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        tracing::debug!("opened secret store at {}", path.display());
        Self::init(conn)
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl SecretBackend for SqliteBackend {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    fn load(&self, name: &str) -> Result<Option<SecretRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM secrets WHERE name = ?1");
        let row = self
            .conn
            .query_row(&sql, params![name], read_row)
            .optional()?;
        row.map(RawRow::into_record).transpose()
    }

    fn save(&mut self, record: &SecretRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO secrets (name, sealed_value, created_at, updated_at, last_accessed_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(name) DO UPDATE SET
                sealed_value     = excluded.sealed_value,
                created_at       = excluded.created_at,
                updated_at       = excluded.updated_at,
                last_accessed_at = excluded.last_accessed_at,
                expires_at       = excluded.expires_at",
            params![
                record.name,
                record.sealed_value,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
                record.last_accessed_at.map(|t| t.to_rfc3339()),
                record.expires_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM secrets WHERE name = ?1", params![name])?;
        Ok(affected > 0)
    }

    fn list(&self) -> Result<Vec<SecretRecord>> {
        let sql = format!("SELECT {COLUMNS} FROM secrets ORDER BY name");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.into_record()?);
        }
        Ok(records)
    }

    fn touch(&mut self, name: &str, at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "UPDATE secrets SET last_accessed_at = ?2 WHERE name = ?1",
            params![name, at.to_rfc3339()],
        )?;
        Ok(())
    }
}

/// Column values before timestamp parsing.
struct RawRow {
    name: String,
    sealed_value: String,
    created_at: String,
    updated_at: String,
    last_accessed_at: Option<String>,
    expires_at: Option<String>,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        name: row.get(0)?,
        sealed_value: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
        last_accessed_at: row.get(4)?,
        expires_at: row.get(5)?,
    })
}

impl RawRow {
    fn into_record(self) -> Result<SecretRecord> {
        Ok(SecretRecord {
            created_at: parse_ts(&self.name, &self.created_at)?,
            updated_at: parse_ts(&self.name, &self.updated_at)?,
            last_accessed_at: self
                .last_accessed_at
                .as_deref()
                .map(|s| parse_ts(&self.name, s))
                .transpose()?,
            expires_at: self
                .expires_at
                .as_deref()
                .map(|s| parse_ts(&self.name, s))
                .transpose()?,
            name: self.name,
            sealed_value: self.sealed_value,
        })
    }
}

fn parse_ts(name: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FieldSealError::StoreError(format!("bad timestamp on '{name}': {e}")))
}
