//! Integration tests for the FieldSeal secret store.

use chrono::Duration;
use tempfile::TempDir;

use fieldseal::crypto::FieldCipher;
use fieldseal::errors::FieldSealError;
use fieldseal::store::{SecretBackend, SecretsManager, SqliteBackend};

const KEY: [u8; 32] = [0x6Bu8; 32];

/// Helper: a database path inside a fresh temp dir.
fn store_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("secrets.db");
    (dir, path)
}

fn open(path: &std::path::Path, key: &[u8; 32]) -> SecretsManager {
    let backend = SqliteBackend::open(path).expect("open store");
    SecretsManager::new(FieldCipher::from_key_bytes(key), Box::new(backend))
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn secrets_survive_reopen() {
    let (_dir, path) = store_path();

    {
        let mut m = open(&path, &KEY);
        m.set_secret("payment.gateway_key", "pk_live_123", None)
            .unwrap();
        m.set_secret("sync.api_token", "tok_xyz", None).unwrap();
    }

    let mut m = open(&path, &KEY);
    assert_eq!(m.get_secret("payment.gateway_key").unwrap(), "pk_live_123");
    assert_eq!(m.get_secret("sync.api_token").unwrap(), "tok_xyz");
}

#[test]
fn database_never_contains_plaintext() {
    let (_dir, path) = store_path();
    let mut m = open(&path, &KEY);
    m.set_secret("license", "ACME-PLAINTEXT-MARKER", None)
        .unwrap();
    drop(m);

    let raw = std::fs::read(&path).unwrap();
    let needle = b"ACME-PLAINTEXT-MARKER";
    assert!(!raw.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn reopening_with_another_key_is_an_integrity_violation() {
    let (_dir, path) = store_path();
    open(&path, &KEY).set_secret("k", "v", None).unwrap();

    let mut other = open(&path, &[0x00u8; 32]);
    assert!(matches!(
        other.get_secret("k"),
        Err(FieldSealError::IntegrityViolation)
    ));
}

#[test]
fn tampered_row_is_detected() {
    let (_dir, path) = store_path();
    let mut m = open(&path, &KEY);
    m.set_secret("k", "value", None).unwrap();
    drop(m);

    // Replace the sealed value with one sealed under another key.
    let mut backend = SqliteBackend::open(&path).unwrap();
    let mut record = backend.load("k").unwrap().unwrap();
    let foreign = FieldCipher::from_key_bytes(&[0x01u8; 32])
        .encrypt("injected")
        .unwrap();
    record.sealed_value = foreign;
    backend.save(&record).unwrap();

    let mut m = open(&path, &KEY);
    assert!(matches!(
        m.get_secret("k"),
        Err(FieldSealError::IntegrityViolation)
    ));
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

#[test]
fn expired_secret_cannot_be_read() {
    let (_dir, path) = store_path();
    let mut m = open(&path, &KEY);
    m.set_secret("otp", "123456", Some(Duration::seconds(-1)))
        .unwrap();

    assert!(matches!(
        m.get_secret("otp"),
        Err(FieldSealError::SecretExpired(_))
    ));
    // Still listed until purged.
    assert!(m.contains("otp").unwrap());
}

#[test]
fn purge_removes_only_expired_secrets() {
    let (_dir, path) = store_path();
    let mut m = open(&path, &KEY);
    m.set_secret("stale", "a", Some(Duration::seconds(-5)))
        .unwrap();
    m.set_secret("fresh", "b", Some(Duration::days(1))).unwrap();
    m.set_secret("forever", "c", None).unwrap();

    assert_eq!(m.purge_expired().unwrap(), 1);
    assert_eq!(m.purge_expired().unwrap(), 0);

    let names: Vec<String> = m.list_secrets().unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["forever", "fresh"]);
}

#[test]
fn updating_a_secret_resets_its_expiry() {
    let (_dir, path) = store_path();
    let mut m = open(&path, &KEY);
    m.set_secret("session", "old", Some(Duration::seconds(-1)))
        .unwrap();
    m.set_secret("session", "new", None).unwrap();

    assert_eq!(m.get_secret("session").unwrap(), "new");
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn out_of_range_ttl_is_rejected_without_writing() {
    let (_tmp, path) = store_path();
    let mut mgr = open(&path, &KEY);

    let err = mgr
        .set_secret("k", "v", Some(Duration::days(100_000_000)))
        .unwrap_err();
    assert!(matches!(err, FieldSealError::InvalidTtl(_)));
    assert!(!mgr.contains("k").unwrap());
}

#[test]
fn out_of_range_default_ttl_is_rejected() {
    let (_tmp, path) = store_path();
    let mut mgr = open(&path, &KEY).with_default_ttl(Some(Duration::days(i64::from(u32::MAX))));

    assert!(matches!(
        mgr.set_secret("k", "v", None),
        Err(FieldSealError::InvalidTtl(_))
    ));
}

#[test]
fn missing_secret_errors() {
    let (_dir, path) = store_path();
    let mut m = open(&path, &KEY);

    assert!(matches!(
        m.get_secret("ghost"),
        Err(FieldSealError::SecretNotFound(_))
    ));
    assert!(matches!(
        m.delete_secret("ghost"),
        Err(FieldSealError::SecretNotFound(_))
    ));
}

#[test]
fn invalid_names_are_rejected_before_storage() {
    let (_dir, path) = store_path();
    let mut m = open(&path, &KEY);

    assert!(matches!(
        m.set_secret("bad name", "v", None),
        Err(FieldSealError::InvalidSecretName(_))
    ));
    assert!(m.list_secrets().unwrap().is_empty());
}

#[test]
fn delete_then_get_fails() {
    let (_dir, path) = store_path();
    let mut m = open(&path, &KEY);
    m.set_secret("k", "v", None).unwrap();
    m.delete_secret("k").unwrap();
    assert!(!m.contains("k").unwrap());
}

#[test]
fn empty_value_is_stored_as_empty() {
    let (_dir, path) = store_path();
    let mut m = open(&path, &KEY);
    m.set_secret("blank", "", None).unwrap();
    assert_eq!(m.get_secret("blank").unwrap(), "");
}
