//! Sub-key derivation using PBKDF2-HMAC-SHA256.
//!
//! From a single 32-byte master key we derive:
//! - An **encryption key** for AES-256-CBC.
//! - An **authentication key** for HMAC-SHA256.
//!
//! PBKDF2 is run once with a fixed salt to produce 64 bytes; the first
//! half becomes the encryption key and the second half the HMAC key.
//! The salt and iteration count are part of the on-disk contract;
//! changing either makes previously written data unreadable.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length of every key handled by this module (256 bits).
pub const KEY_LEN: usize = 32;

/// PBKDF2 rounds used to split the master key into sub-keys.
pub const SUBKEY_ITERATIONS: u32 = 10_000;

/// Fixed salt for sub-key derivation.
const SUBKEY_SALT: &[u8] = b"FieldSeal.DerivedKeys.v1";

/// A 32-byte master key that zeroes its memory when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Derive the encryption/authentication pair from this master key.
    pub fn derive_keys(&self) -> DerivedKeyPair {
        derive_keys(&self.bytes)
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(..)")
    }
}

/// Encryption and authentication keys derived from one master key.
///
/// Both buffers are overwritten with zeros on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeyPair {
    encryption_key: [u8; KEY_LEN],
    authentication_key: [u8; KEY_LEN],
}

impl DerivedKeyPair {
    /// Key used for AES-256-CBC.
    pub fn encryption_key(&self) -> &[u8; KEY_LEN] {
        &self.encryption_key
    }

    /// Key used for HMAC-SHA256.
    pub fn authentication_key(&self) -> &[u8; KEY_LEN] {
        &self.authentication_key
    }
}

impl std::fmt::Debug for DerivedKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKeyPair(..)")
    }
}

/// Derive the encryption and authentication keys from `master_key`.
///
/// Deterministic: the same master key always yields the same pair, so
/// data sealed in an earlier process run can still be opened.
pub fn derive_keys(master_key: &[u8; KEY_LEN]) -> DerivedKeyPair {
    let mut okm = Zeroizing::new([0u8; KEY_LEN * 2]);
    pbkdf2_hmac::<Sha256>(master_key, SUBKEY_SALT, SUBKEY_ITERATIONS, &mut *okm);

    let mut pair = DerivedKeyPair {
        encryption_key: [0u8; KEY_LEN],
        authentication_key: [0u8; KEY_LEN],
    };
    pair.encryption_key.copy_from_slice(&okm[..KEY_LEN]);
    pair.authentication_key.copy_from_slice(&okm[KEY_LEN..]);
    pair
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_keys_is_deterministic() {
        let master = [0x42u8; KEY_LEN];
        let a = derive_keys(&master);
        let b = derive_keys(&master);
        assert_eq!(a.encryption_key(), b.encryption_key());
        assert_eq!(a.authentication_key(), b.authentication_key());
    }

    #[test]
    fn encryption_and_authentication_keys_differ() {
        let pair = derive_keys(&[0u8; KEY_LEN]);
        assert_ne!(pair.encryption_key(), pair.authentication_key());
    }

    #[test]
    fn different_masters_give_different_pairs() {
        let a = derive_keys(&[0x01u8; KEY_LEN]);
        let b = derive_keys(&[0x02u8; KEY_LEN]);
        assert_ne!(a.encryption_key(), b.encryption_key());
        assert_ne!(a.authentication_key(), b.authentication_key());
    }

    #[test]
    fn master_key_wrapper_matches_free_function() {
        let raw = [0x77u8; KEY_LEN];
        let mk = MasterKey::new(raw);
        let via_wrapper = mk.derive_keys();
        let via_fn = derive_keys(&raw);
        assert_eq!(via_wrapper.encryption_key(), via_fn.encryption_key());
        assert_eq!(
            via_wrapper.authentication_key(),
            via_fn.authentication_key()
        );
    }

    #[test]
    fn debug_output_hides_key_material() {
        let mk = MasterKey::new([0xAAu8; KEY_LEN]);
        assert_eq!(format!("{mk:?}"), "MasterKey(..)");
        assert_eq!(format!("{:?}", mk.derive_keys()), "DerivedKeyPair(..)");
    }
}
