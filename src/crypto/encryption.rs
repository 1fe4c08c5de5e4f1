//! AES-256-CBC + HMAC-SHA256 encrypt-then-MAC for field values.
//!
//! Each call to `encrypt` generates a fresh random 16-byte IV, encrypts
//! with PKCS7 padding, and authenticates `IV || ciphertext` with the
//! derived HMAC key. `decrypt` verifies the tag in constant time before
//! touching the cipher, so a tampered blob never reaches the padding check.
//!
//! Layout of the encoded blob (before base64):
//!   [ 32-byte HMAC | 16-byte IV | ciphertext (multiple of 16) ]
//!
//! Blobs shorter than 48 bytes predate the HMAC prefix and are read as
//! `[ IV | ciphertext ]` without authentication, unless the cipher was
//! built with `LegacyPolicy::Reject`.

use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::kdf::{resolve_master_key, MasterKeySource};
use super::keys::{derive_keys, DerivedKeyPair, MasterKey, KEY_LEN};
use crate::errors::{FieldSealError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Size of the HMAC-SHA256 tag in bytes.
pub const TAG_LEN: usize = 32;

/// Size of the AES-CBC initialization vector in bytes.
pub const IV_LEN: usize = 16;

/// Shortest blob that is parsed as the authenticated format.
pub const MIN_SEALED_LEN: usize = TAG_LEN + IV_LEN;

/// What to do with blobs too short to carry an HMAC tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyPolicy {
    /// Decrypt them as unauthenticated `IV || ciphertext`.
    #[default]
    Accept,
    /// Fail with `DecryptionFailed`.
    Reject,
}

/// Seals and opens field values with keys derived once at construction.
///
/// The derived keys are zeroed when the cipher is dropped. All methods
/// take `&self`, so one instance can be shared across threads.
pub struct FieldCipher {
    keys: DerivedKeyPair,
    legacy: LegacyPolicy,
}

impl FieldCipher {
    /// Build a cipher from an explicit master key.
    pub fn new(master_key: &MasterKey) -> Self {
        Self::from_key_bytes(master_key.as_bytes())
    }

    /// Build a cipher from raw master key bytes.
    pub fn from_key_bytes(master_key: &[u8; KEY_LEN]) -> Self {
        Self {
            keys: derive_keys(master_key),
            legacy: LegacyPolicy::default(),
        }
    }

    /// Build a cipher from the process master key (env var or machine key).
    pub fn from_environment() -> (Self, MasterKeySource) {
        let (master, source) = resolve_master_key();
        (Self::new(&master), source)
    }

    /// Set how short, tag-less blobs are handled.
    pub fn with_legacy_policy(mut self, legacy: LegacyPolicy) -> Self {
        self.legacy = legacy;
        self
    }

    pub fn legacy_policy(&self) -> LegacyPolicy {
        self.legacy
    }

    /// Encrypt `plaintext` and return the base64 blob.
    ///
    /// An empty input is returned unchanged.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }
        let sealed = self.encrypt_bytes(plaintext.as_bytes())?;
        Ok(BASE64.encode(sealed))
    }

    /// Decrypt a base64 blob produced by `encrypt`.
    ///
    /// An empty input is returned unchanged. A tag mismatch is reported as
    /// `IntegrityViolation` and yields no output.
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        if encoded.is_empty() {
            return Ok(String::new());
        }

        let blob = BASE64.decode(encoded).map_err(|e| {
            tracing::debug!("ciphertext is not valid base64: {e}");
            FieldSealError::DecryptionFailed
        })?;

        let plaintext = self.decrypt_bytes(&blob)?;
        String::from_utf8(plaintext).map_err(|_| {
            tracing::debug!("decrypted bytes are not valid UTF-8");
            FieldSealError::DecryptionFailed
        })
    }

    /// Encrypt raw bytes into `HMAC || IV || ciphertext`.
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut iv = [0u8; IV_LEN];
        rand::rng().fill_bytes(&mut iv);

        let cipher = Aes256CbcEnc::new_from_slices(self.keys.encryption_key(), &iv).map_err(|e| {
            tracing::debug!("cipher init failed: {e}");
            FieldSealError::EncryptionFailed
        })?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut body = Vec::with_capacity(IV_LEN + ciphertext.len());
        body.extend_from_slice(&iv);
        body.extend_from_slice(&ciphertext);

        let tag = self.compute_tag(&body)?;

        let mut output = Vec::with_capacity(TAG_LEN + body.len());
        output.extend_from_slice(&tag);
        output.extend_from_slice(&body);
        Ok(output)
    }

    /// Verify and decrypt raw bytes produced by `encrypt_bytes`.
    pub fn decrypt_bytes(&self, blob: &[u8]) -> Result<Vec<u8>> {
        if blob.len() < MIN_SEALED_LEN {
            return self.decrypt_legacy(blob);
        }

        let (stored_tag, body) = blob.split_at(TAG_LEN);
        let expected_tag = self.compute_tag(body)?;

        if !bool::from(expected_tag.as_slice().ct_eq(stored_tag)) {
            tracing::debug!("HMAC mismatch on {}-byte blob", blob.len());
            return Err(FieldSealError::IntegrityViolation);
        }

        let (iv, ciphertext) = body.split_at(IV_LEN);
        self.cbc_decrypt(iv, ciphertext)
    }

    /// Read a pre-HMAC `IV || ciphertext` blob.
    fn decrypt_legacy(&self, blob: &[u8]) -> Result<Vec<u8>> {
        if self.legacy == LegacyPolicy::Reject {
            tracing::debug!("rejecting {}-byte blob without HMAC tag", blob.len());
            return Err(FieldSealError::DecryptionFailed);
        }
        if blob.len() <= IV_LEN {
            tracing::debug!("legacy blob too short: {} bytes", blob.len());
            return Err(FieldSealError::DecryptionFailed);
        }

        tracing::warn!(
            "decrypting {}-byte value in legacy unauthenticated format; re-encrypt to upgrade",
            blob.len()
        );
        let (iv, ciphertext) = blob.split_at(IV_LEN);
        self.cbc_decrypt(iv, ciphertext)
    }

    fn cbc_decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256CbcDec::new_from_slices(self.keys.encryption_key(), iv).map_err(|e| {
            tracing::debug!("cipher init failed: {e}");
            FieldSealError::DecryptionFailed
        })?;

        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|e| {
                tracing::debug!("AES-CBC unpad failed: {e}");
                FieldSealError::DecryptionFailed
            })
    }

    fn compute_tag(&self, body: &[u8]) -> Result<[u8; TAG_LEN]> {
        let mut mac = HmacSha256::new_from_slice(self.keys.authentication_key()).map_err(|e| {
            tracing::debug!("HMAC init failed: {e}");
            FieldSealError::EncryptionFailed
        })?;
        mac.update(body);

        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&mac.finalize().into_bytes());
        Ok(tag)
    }
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher")
            .field("keys", &self.keys)
            .field("legacy", &self.legacy)
            .finish()
    }
}
