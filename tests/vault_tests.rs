//! Integration tests for the pwvault vault module.

use std::collections::HashSet;

use pwvault::crypto::envelope::PREFIX_LEN;
use pwvault::crypto::{encrypt_under_passphrase, AuthParams, KdfKind, KdfParams};
use pwvault::errors::PwVaultError;
use pwvault::vault::{load_vault, save_vault, Vault, VaultParams};
use tempfile::TempDir;

/// Helper: parameters cheap enough for tests.
fn fast() -> VaultParams {
    VaultParams {
        vault_kdf: KdfParams::new(KdfKind::Scrypt, 6),
        secret_kdf: KdfParams::new(KdfKind::Argon2id, 6),
        auth: AuthParams {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        },
    }
}

fn names(vault: &Vault) -> HashSet<String> {
    vault.list_accounts().into_iter().collect()
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Helper: a vault holding user1..user3.
fn three_account_vault() -> Vault {
    let mut vault = Vault::create_with_params(b"pw1", fast()).expect("create vault");
    vault.add_account(b"pw1", "user1", "secretA").unwrap();
    vault.add_account(b"pw1", "user2", "secretB").unwrap();
    vault.add_account(b"pw1", "user3", "secretC").unwrap();
    vault
}

// ---------------------------------------------------------------------------
// Account lifecycle
// ---------------------------------------------------------------------------

#[test]
fn account_lifecycle() {
    let mut vault = three_account_vault();

    assert_eq!(names(&vault), set(&["user1", "user2", "user3"]));
    assert_eq!(vault.get_secret(b"pw1", "user2").unwrap().as_str(), "secretB");

    // Serialize and reopen with the same passphrase.
    let envelope = vault.serialize(b"pw1").unwrap();
    let reopened = Vault::open_with_params(b"pw1", &envelope, fast()).unwrap();
    assert_eq!(names(&reopened), names(&vault));
    for (user, secret) in [("user1", "secretA"), ("user2", "secretB"), ("user3", "secretC")] {
        assert_eq!(reopened.get_secret(b"pw1", user).unwrap().as_str(), secret);
    }

    // Remove user1.
    vault.remove_account(b"pw1", "user1").unwrap();
    let err = vault.get_secret(b"pw1", "user1").unwrap_err();
    assert!(matches!(err, PwVaultError::AccountNotFound(name) if name == "user1"));
    assert_eq!(names(&vault), set(&["user2", "user3"]));
}

#[test]
fn new_vault_is_empty_and_round_trips() {
    let vault = Vault::create_with_params(b"pw", fast()).unwrap();
    assert_eq!(vault.account_count(), 0);
    assert!(vault.list_accounts().is_empty());

    let envelope = vault.serialize(b"pw").unwrap();
    // Empty map: just the prefix and the tag.
    assert_eq!(envelope.len(), PREFIX_LEN + 16);

    let reopened = Vault::open_with_params(b"pw", &envelope, fast()).unwrap();
    assert_eq!(reopened.account_count(), 0);
}

// ---------------------------------------------------------------------------
// Duplicate / missing accounts
// ---------------------------------------------------------------------------

#[test]
fn duplicate_add_is_rejected_and_keeps_original_secret() {
    let mut vault = three_account_vault();

    let err = vault.add_account(b"pw1", "user1", "other").unwrap_err();
    assert!(matches!(err, PwVaultError::DuplicateAccount(name) if name == "user1"));
    assert_eq!(vault.get_secret(b"pw1", "user1").unwrap().as_str(), "secretA");
    assert_eq!(vault.account_count(), 3);
}

#[test]
fn duplicate_is_reported_even_with_wrong_passphrase() {
    let mut vault = three_account_vault();
    let err = vault.add_account(b"wrong", "user1", "other").unwrap_err();
    assert!(matches!(err, PwVaultError::DuplicateAccount(_)));
}

#[test]
fn remove_missing_account_fails() {
    let mut vault = three_account_vault();
    let err = vault.remove_account(b"pw1", "nobody").unwrap_err();
    assert!(matches!(err, PwVaultError::AccountNotFound(_)));
    assert_eq!(vault.account_count(), 3);
}

// ---------------------------------------------------------------------------
// Passphrase checks
// ---------------------------------------------------------------------------

#[test]
fn every_guarded_operation_checks_the_passphrase() {
    let mut vault = three_account_vault();

    assert!(matches!(
        vault.get_secret(b"pw2", "user1").unwrap_err(),
        PwVaultError::MasterMismatch
    ));
    assert!(matches!(
        vault.add_account(b"pw2", "user4", "x").unwrap_err(),
        PwVaultError::MasterMismatch
    ));
    assert!(matches!(
        vault.remove_account(b"pw2", "user1").unwrap_err(),
        PwVaultError::MasterMismatch
    ));
    assert!(matches!(
        vault.serialize(b"pw2").unwrap_err(),
        PwVaultError::MasterMismatch
    ));

    // Nothing changed.
    assert_eq!(names(&vault), set(&["user1", "user2", "user3"]));
}

#[test]
fn open_with_wrong_passphrase_fails_authentication() {
    let envelope = three_account_vault().serialize(b"pw1").unwrap();
    let err = Vault::open_with_params(b"pw2", &envelope, fast()).unwrap_err();
    assert!(matches!(err, PwVaultError::AuthenticationFailure));
}

#[test]
fn open_with_different_vault_cost_fails_authentication() {
    let envelope = three_account_vault().serialize(b"pw1").unwrap();
    let other = VaultParams {
        vault_kdf: KdfParams::new(KdfKind::Scrypt, 7),
        ..fast()
    };
    let err = Vault::open_with_params(b"pw1", &envelope, other).unwrap_err();
    assert!(matches!(err, PwVaultError::AuthenticationFailure));
}

#[test]
fn tampered_vault_envelope_is_rejected() {
    let mut envelope = three_account_vault().serialize(b"pw1").unwrap();
    let last = envelope.len() - 1;
    envelope[last] ^= 0x01;

    let err = Vault::open_with_params(b"pw1", &envelope, fast()).unwrap_err();
    assert!(matches!(err, PwVaultError::AuthenticationFailure));
}

#[test]
fn open_rejects_plaintext_that_is_not_a_map_encoding() {
    // Authenticates fine, but three bytes cannot hold a length field.
    let envelope = encrypt_under_passphrase(b"pw", &[1, 0, 0], &fast().vault_kdf).unwrap();
    let err = Vault::open_with_params(b"pw", &envelope, fast()).unwrap_err();
    assert!(matches!(err, PwVaultError::TruncatedData));
}

#[test]
fn open_rejects_non_utf8_account_name() {
    let mut encoded = Vec::new();
    encoded.extend_from_slice(&2u64.to_le_bytes());
    encoded.extend_from_slice(&[0xC3, 0x28]);
    encoded.extend_from_slice(&1u64.to_le_bytes());
    encoded.push(0x00);

    let envelope = encrypt_under_passphrase(b"pw", &encoded, &fast().vault_kdf).unwrap();
    let err = Vault::open_with_params(b"pw", &envelope, fast()).unwrap_err();
    assert!(matches!(err, PwVaultError::DecodeError(_)));
}

#[test]
fn serialize_twice_yields_different_envelopes() {
    let vault = three_account_vault();
    let a = vault.serialize(b"pw1").unwrap();
    let b = vault.serialize(b"pw1").unwrap();
    assert_ne!(a, b);
    assert_ne!(a[..PREFIX_LEN], b[..PREFIX_LEN]);
}

// ---------------------------------------------------------------------------
// Persistence on disk
// ---------------------------------------------------------------------------

#[test]
fn save_and_load_from_disk() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("vault.pwv");

    let vault = three_account_vault();
    save_vault(&vault, &path, b"pw1").unwrap();

    let raw = std::fs::read(&path).unwrap();
    assert!(!raw.windows(5).any(|w| w == b"user1"));

    let loaded = load_vault(&path, b"pw1", fast()).unwrap();
    assert_eq!(names(&loaded), set(&["user1", "user2", "user3"]));
    assert_eq!(loaded.get_secret(b"pw1", "user3").unwrap().as_str(), "secretC");
}

#[test]
fn load_missing_file_is_vault_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_vault(&dir.path().join("nope.pwv"), b"pw", fast()).unwrap_err();
    assert!(matches!(err, PwVaultError::VaultNotFound(_)));
}

#[test]
fn vault_can_be_shared_behind_a_mutex() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let shared = Arc::new(Mutex::new(Vault::create_with_params(b"pw", fast()).unwrap()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut vault = shared.lock().unwrap();
                vault.add_account(b"pw", &format!("user{i}"), "secret").unwrap();
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(shared.lock().unwrap().account_count(), 4);
}
