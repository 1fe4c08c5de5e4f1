//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{BackendKind, Settings};
use crate::crypto::{FieldCipher, MasterKeySource};
use crate::errors::{FieldSealError, Result};
use crate::store::{SecretBackend, SecretsManager, SqliteBackend};

/// FieldSeal CLI: authenticated field encryption and local secrets.
#[derive(Parser)]
#[command(
    name = "fieldseal",
    about = "Authenticated field encryption and local secret storage",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Secret store path (overrides `store_path` in .fieldseal.toml)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Log filter, e.g. `debug` or `fieldseal=trace` (FIELDSEAL_LOG wins)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a value (reads stdin when VALUE is omitted)
    Encrypt {
        /// Plaintext to encrypt
        value: Option<String>,
    },

    /// Decrypt a value produced by `encrypt`
    Decrypt {
        /// Base64 ciphertext to decrypt
        value: Option<String>,
    },

    /// Print the base64 SHA-256 hash of a value
    Hash {
        /// Value to hash
        value: String,
    },

    /// Check a value against a hash from `hash`
    VerifyHash {
        /// Value to check
        value: String,
        /// Expected base64 hash
        expected: String,
    },

    /// Generate a random master key for SQLITE_ENCRYPTION_KEY
    Keygen,

    /// Show the active key source and configuration
    Status,

    /// Manage stored secrets
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Hash or verify passwords (Argon2id)
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Show version
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Secret subcommands.
#[derive(clap::Subcommand)]
pub enum SecretAction {
    /// Set a secret (add or update)
    Set {
        /// Secret name (e.g. stripe.api_key)
        key: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
        /// Expire the secret after this many days
        #[arg(long)]
        ttl_days: Option<u32>,
    },

    /// Get a secret's value
    Get {
        /// Secret name
        key: String,
    },

    /// List all secrets
    List,

    /// Delete a secret
    Delete {
        /// Secret name
        key: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Remove every expired secret
    Purge,
}

/// Password subcommands.
#[derive(clap::Subcommand)]
pub enum PasswordAction {
    /// Hash a password read from a prompt or stdin
    Hash,

    /// Verify a password against a stored hash
    Verify {
        /// PHC hash string from `password hash`
        hash: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.fieldseal.toml` from the current directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Build the cipher from the process master key and the configured
/// legacy policy.
pub fn open_cipher(settings: &Settings) -> (FieldCipher, MasterKeySource) {
    let (cipher, source) = FieldCipher::from_environment();
    tracing::debug!("master key source: {source}");
    (cipher.with_legacy_policy(settings.legacy_policy()), source)
}

/// Resolve the store path: `--store` wins over the config file.
pub fn store_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    match &cli.store {
        Some(path) => Ok(PathBuf::from(path)),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(settings.store_path(&cwd))
        }
    }
}

/// Open the configured secret backend and wrap it in a manager.
pub fn open_manager(cli: &Cli, settings: &Settings) -> Result<SecretsManager> {
    let (cipher, _) = open_cipher(settings);
    let backend = open_backend(cli, settings)?;
    Ok(SecretsManager::new(cipher, backend).with_default_ttl(settings.default_ttl()))
}

fn open_backend(cli: &Cli, settings: &Settings) -> Result<Box<dyn SecretBackend>> {
    match settings.backend {
        BackendKind::Sqlite => {
            let path = store_path(cli, settings)?;
            Ok(Box::new(SqliteBackend::open(&path)?))
        }
        #[cfg(feature = "keyring-store")]
        BackendKind::Keyring => Ok(Box::new(crate::store::KeyringBackend::new())),
        #[cfg(not(feature = "keyring-store"))]
        BackendKind::Keyring => Err(FieldSealError::ConfigError(
            "backend = \"keyring\" requires building with the `keyring-store` feature".into(),
        )),
    }
}

/// Read a value from, in order:
/// 1. the inline argument
/// 2. piped stdin (trailing newline trimmed)
/// 3. an interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the value is wiped from memory on drop.
pub fn read_value(inline: Option<&str>, prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']).to_string();
        return Ok(Zeroizing::new(trimmed));
    }

    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| FieldSealError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}
