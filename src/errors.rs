use thiserror::Error;

/// All errors that can occur in FieldSeal.
///
/// Crypto variants carry no detail on purpose: their `Display` output is
/// stable and never includes plaintext or key material. Low-level causes are
/// emitted through `tracing::debug!` at the point of failure instead.
#[derive(Debug, Error)]
pub enum FieldSealError {
    // --- Crypto errors ---
    #[error("Encryption failed")]
    EncryptionFailed,

    #[error("Decryption failed — malformed or undecodable ciphertext")]
    DecryptionFailed,

    #[error("Integrity check failed — data is corrupted or has been tampered with")]
    IntegrityViolation,

    #[error("Password hashing failed: {0}")]
    PasswordHashFailed(String),

    // --- Secret store errors ---
    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    #[error("Secret '{0}' has expired")]
    SecretExpired(String),

    #[error("Invalid secret name '{0}' — use 1-128 characters from [A-Za-z0-9_.-]")]
    InvalidSecretName(String),

    #[error("Secret lifetime out of range: {0}")]
    InvalidTtl(String),

    #[error("Secret store error: {0}")]
    StoreError(String),

    // --- Keyring errors ---
    #[error("Keyring error: {0}")]
    KeyringError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl From<rusqlite::Error> for FieldSealError {
    fn from(err: rusqlite::Error) -> Self {
        FieldSealError::StoreError(err.to_string())
    }
}

/// Convenience type alias for FieldSeal results.
pub type Result<T> = std::result::Result<T, FieldSealError>;
