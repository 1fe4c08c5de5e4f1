use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::crypto::LegacyPolicy;
use crate::errors::{FieldSealError, Result};

/// Which secret backend the CLI opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Sqlite,
    Keyring,
}

/// Project-level configuration, loaded from `.fieldseal.toml`.
///
/// Every field has a sensible default so FieldSeal works out-of-the-box
/// without any config file at all. Crypto parameters are deliberately
/// absent: they are fixed by the ciphertext format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// SQLite database path, relative to the project root.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Secret backend ("sqlite" or "keyring").
    #[serde(default)]
    pub backend: BackendKind,

    /// Lifetime applied to secrets set without `--ttl-days`.
    #[serde(default)]
    pub default_ttl_days: Option<u32>,

    /// Whether short, untagged ciphertexts may still be decrypted.
    #[serde(default = "default_accept_legacy")]
    pub accept_legacy_blobs: bool,

    /// `tracing` filter directive (e.g. "warn", "fieldseal=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_path() -> String {
    ".fieldseal/secrets.db".to_string()
}

fn default_accept_legacy() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            backend: BackendKind::default(),
            default_ttl_days: None,
            accept_legacy_blobs: default_accept_legacy(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".fieldseal.toml";

    /// Load settings from `<project_dir>/.fieldseal.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            FieldSealError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the store path against the project root.
    pub fn store_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.store_path)
    }

    /// Default secret lifetime, if configured.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl_days.map(|d| Duration::days(i64::from(d)))
    }

    /// Convert the legacy flag into the crypto-layer policy.
    pub fn legacy_policy(&self) -> LegacyPolicy {
        if self.accept_legacy_blobs {
            LegacyPolicy::Accept
        } else {
            LegacyPolicy::Reject
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
