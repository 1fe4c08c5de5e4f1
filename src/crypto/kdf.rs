//! Master-key acquisition.
//!
//! The master key is resolved once per process, first success wins:
//!
//! 1. `SQLITE_ENCRYPTION_KEY` — base64 that must decode to exactly 32 bytes.
//! 2. A deterministic machine key: machine name, user name, OS version,
//!    logical CPU count, working directory and a fixed application salt
//!    string, stretched with PBKDF2-HMAC-SHA256 (100 000 rounds).
//!
//! A malformed environment value is logged and skipped. Resolution never
//! fails, so callers always get a usable key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::keys::{MasterKey, KEY_LEN};

/// Environment variable holding an explicit base64 master key.
pub const MASTER_KEY_ENV: &str = "SQLITE_ENCRYPTION_KEY";

/// PBKDF2 rounds for the machine-derived master key.
pub const MACHINE_KEY_ITERATIONS: u32 = 100_000;

/// Fixed PBKDF2 salt for the machine-derived master key.
const MACHINE_KEY_SALT: &[u8] = b"FieldSeal.MasterKey.v1";

/// Application salt string mixed into the machine fingerprint.
const APP_SALT: &str = "fieldseal-at-rest-encryption";

/// Stand-in when the working directory cannot be read.
const NO_WORKING_DIR: &str = "fieldseal-no-working-dir";

/// Where the active master key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterKeySource {
    /// Decoded from `SQLITE_ENCRYPTION_KEY`.
    Environment,
    /// Derived from the machine fingerprint.
    Machine,
}

impl std::fmt::Display for MasterKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "environment ({MASTER_KEY_ENV})"),
            Self::Machine => f.write_str("machine-derived"),
        }
    }
}

/// Why an environment-supplied key was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRejection {
    Blank,
    NotBase64,
    WrongLength(usize),
}

impl std::fmt::Display for KeyRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => f.write_str("value is blank"),
            Self::NotBase64 => f.write_str("value is not valid base64"),
            Self::WrongLength(n) => write!(f, "expected {KEY_LEN} bytes, got {n}"),
        }
    }
}

/// The host attributes that feed the machine-derived key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineIdentity {
    pub machine_name: String,
    pub user_name: String,
    pub os_version: String,
    pub processor_count: usize,
    pub working_dir: String,
}

impl MachineIdentity {
    /// Collect the identity of the current host and process.
    pub fn current() -> Self {
        let machine_name = env_first(&["COMPUTERNAME", "HOSTNAME"])
            .or_else(|| read_trimmed("/etc/hostname"))
            .unwrap_or_else(|| "unknown-host".to_string());

        let user_name =
            env_first(&["USER", "USERNAME", "LOGNAME"]).unwrap_or_else(|| "unknown-user".into());

        let os_version = match read_trimmed("/proc/sys/kernel/osrelease") {
            Some(release) => format!("{} {release}", std::env::consts::OS),
            None => format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
        };

        let processor_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        let working_dir = std::env::current_dir()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| NO_WORKING_DIR.to_string());

        Self {
            machine_name,
            user_name,
            os_version,
            processor_count,
            working_dir,
        }
    }

    /// The string that gets stretched into the master key.
    fn fingerprint(&self) -> Zeroizing<String> {
        Zeroizing::new(format!(
            "{}|{}|{}|{}|{}|{}",
            self.machine_name,
            self.user_name,
            self.os_version,
            self.processor_count,
            self.working_dir,
            APP_SALT
        ))
    }
}

/// Resolve the process master key from the environment and host.
pub fn resolve_master_key() -> (MasterKey, MasterKeySource) {
    let env_value = Zeroizing::new(std::env::var(MASTER_KEY_ENV).ok());
    resolve_master_key_with(env_value.as_deref(), &MachineIdentity::current())
}

/// Resolve a master key from an explicit environment value and identity.
///
/// An empty value counts as unset. Anything else that does not decode,
/// whitespace included, is logged before falling back.
pub fn resolve_master_key_with(
    env_value: Option<&str>,
    identity: &MachineIdentity,
) -> (MasterKey, MasterKeySource) {
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        match decode_master_key(value) {
            Ok(key) => {
                tracing::debug!("using master key from {MASTER_KEY_ENV}");
                return (key, MasterKeySource::Environment);
            }
            Err(reason) => {
                tracing::warn!(
                    "ignoring {MASTER_KEY_ENV} ({reason}); falling back to machine-derived key"
                );
            }
        }
    }

    tracing::debug!("deriving master key from machine identity");
    (derive_machine_key(identity), MasterKeySource::Machine)
}

/// Decode a base64 master key, requiring exactly 32 bytes.
pub fn decode_master_key(value: &str) -> std::result::Result<MasterKey, KeyRejection> {
    let value = value.trim();
    if value.is_empty() {
        return Err(KeyRejection::Blank);
    }
    let decoded = Zeroizing::new(
        BASE64
            .decode(value)
            .map_err(|_| KeyRejection::NotBase64)?,
    );

    if decoded.len() != KEY_LEN {
        return Err(KeyRejection::WrongLength(decoded.len()));
    }

    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&decoded);
    Ok(MasterKey::new(bytes))
}

/// Stretch the machine fingerprint into a 32-byte master key.
pub fn derive_machine_key(identity: &MachineIdentity) -> MasterKey {
    let fingerprint = identity.fingerprint();
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(
        fingerprint.as_bytes(),
        MACHINE_KEY_SALT,
        MACHINE_KEY_ITERATIONS,
        &mut bytes,
    );
    MasterKey::new(bytes)
}

/// Generate a fresh random master key encoded for `SQLITE_ENCRYPTION_KEY`.
pub fn generate_master_key_b64() -> String {
    use rand::RngCore;

    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    rand::rng().fill_bytes(&mut *bytes);
    BASE64.encode(&*bytes)
}

fn env_first(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

fn read_trimmed(path: &str) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
