//! The vault aggregate: master passphrase hash + account map.
//!
//! `Vault` is double-enveloped.  Each secret is sealed on its own under
//! the master passphrase (per-secret KDF params), and the encoded account
//! map is sealed again as a whole by `serialize` (vault KDF params).
//!
//! Every revealing or mutating operation takes the master passphrase
//! again and checks it against the stored hash.  Nothing caches a
//! "verified" state between calls.
//!
//! `Vault` has no internal lock.  Callers sharing one across threads
//! must hold a mutex around each whole operation.

use zeroize::{Zeroize, Zeroizing};

use crate::crypto::auth::{hash_passphrase, verify_passphrase, AuthParams, MasterHash};
use crate::crypto::encryption::{decrypt_under_passphrase, encrypt_under_passphrase};
use crate::crypto::kdf::KdfParams;
use crate::errors::{PwVaultError, Result};

use super::format::{decode_map, encode_map, AccountMap};

/// Every cost knob a vault uses.
///
/// The whole-vault envelope carries no header, so `vault_kdf` and
/// `secret_kdf` must be the same when reopening as when saving.
/// `auth` is free to change: the master hash records its own params.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultParams {
    /// KDF for the whole serialized vault.
    pub vault_kdf: KdfParams,
    /// KDF for each individual secret.
    pub secret_kdf: KdfParams,
    /// Work factor of the master passphrase hash.
    pub auth: AuthParams,
}

impl Default for VaultParams {
    /// Format v1.
    fn default() -> Self {
        Self {
            vault_kdf: KdfParams::VAULT_V1,
            secret_kdf: KdfParams::SECRET_V1,
            auth: AuthParams::default(),
        }
    }
}

/// An unlocked vault held in memory.
#[derive(Debug)]
pub struct Vault {
    params: VaultParams,
    master_hash: MasterHash,
    accounts: AccountMap,
}

impl Vault {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create an empty vault with the format v1 parameters.
    pub fn create(passphrase: &[u8]) -> Result<Self> {
        Self::create_with_params(passphrase, VaultParams::default())
    }

    /// Create an empty vault with explicit parameters.
    pub fn create_with_params(passphrase: &[u8], params: VaultParams) -> Result<Self> {
        let master_hash = hash_passphrase(passphrase, &params.auth)?;
        tracing::debug!("created empty vault");

        Ok(Self {
            params,
            master_hash,
            accounts: AccountMap::new(),
        })
    }

    /// Rebuild a vault from an envelope produced by `serialize`.
    pub fn open(passphrase: &[u8], envelope: &[u8]) -> Result<Self> {
        Self::open_with_params(passphrase, envelope, VaultParams::default())
    }

    /// Rebuild a vault from an envelope with explicit parameters.
    ///
    /// A successful decrypt already proves the passphrase through the
    /// AEAD tag, so the master hash is simply recomputed from it.
    pub fn open_with_params(
        passphrase: &[u8],
        envelope: &[u8],
        params: VaultParams,
    ) -> Result<Self> {
        let plaintext = decrypt_under_passphrase(passphrase, envelope, &params.vault_kdf)?;
        let accounts = decode_map(&plaintext)?;
        let master_hash = hash_passphrase(passphrase, &params.auth)?;

        tracing::debug!(accounts = accounts.len(), "opened vault");

        Ok(Self {
            params,
            master_hash,
            accounts,
        })
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt the whole vault into one envelope.
    ///
    /// Persisting the returned bytes is the caller's job.
    pub fn serialize(&self, passphrase: &[u8]) -> Result<Vec<u8>> {
        verify_passphrase(&self.master_hash, passphrase)?;

        let mut encoded = encode_map(&self.accounts);
        let envelope = encrypt_under_passphrase(passphrase, &encoded, &self.params.vault_kdf);
        encoded.zeroize();

        tracing::debug!(accounts = self.accounts.len(), "serialized vault");
        envelope
    }

    // ------------------------------------------------------------------
    // Account operations
    // ------------------------------------------------------------------

    /// Add a new account.  Existing accounts are never overwritten.
    ///
    /// The duplicate check runs before the passphrase check so a doomed
    /// call costs no hashing work.
    pub fn add_account(&mut self, passphrase: &[u8], username: &str, secret: &str) -> Result<()> {
        if self.accounts.contains_key(username) {
            return Err(PwVaultError::DuplicateAccount(username.to_string()));
        }
        verify_passphrase(&self.master_hash, passphrase)?;

        let sealed =
            encrypt_under_passphrase(passphrase, secret.as_bytes(), &self.params.secret_kdf)?;
        self.accounts.insert(username.to_string(), sealed);

        tracing::debug!(username, "added account");
        Ok(())
    }

    /// Remove an account.
    pub fn remove_account(&mut self, passphrase: &[u8], username: &str) -> Result<()> {
        if !self.accounts.contains_key(username) {
            return Err(PwVaultError::AccountNotFound(username.to_string()));
        }
        verify_passphrase(&self.master_hash, passphrase)?;

        self.accounts.remove(username);

        tracing::debug!(username, "removed account");
        Ok(())
    }

    /// Decrypt and return an account's secret.
    pub fn get_secret(&self, passphrase: &[u8], username: &str) -> Result<Zeroizing<String>> {
        let sealed = self
            .accounts
            .get(username)
            .ok_or_else(|| PwVaultError::AccountNotFound(username.to_string()))?;
        verify_passphrase(&self.master_hash, passphrase)?;

        let mut plaintext = decrypt_under_passphrase(passphrase, sealed, &self.params.secret_kdf)?;

        // Take the bytes out of the Zeroizing wrapper without copying.
        let bytes = std::mem::take(&mut *plaintext);
        String::from_utf8(bytes).map(Zeroizing::new).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PwVaultError::DecodeError("secret is not valid UTF-8".to_string())
        })
    }

    /// Account names, in no particular order.  No passphrase required.
    pub fn list_accounts(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the number of accounts in the vault.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Returns `true` if the vault has an account with this name.
    ///
    /// This is a metadata-only check; no decryption is performed.
    pub fn contains_account(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Returns the parameters this vault encrypts with.
    pub fn params(&self) -> &VaultParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::KdfKind;

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

    #[test]
    fn default_params_are_format_v1() {
        let p = VaultParams::default();
        assert_eq!(p.vault_kdf, KdfParams::new(KdfKind::Scrypt, 18));
        assert_eq!(p.secret_kdf, KdfParams::new(KdfKind::Argon2id, 14));
        assert_eq!(p.auth, AuthParams::default());
    }

    #[test]
    fn stored_secret_is_an_envelope_not_plaintext() {
        let mut vault = Vault::create_with_params(b"pw", fast()).unwrap();
        vault.add_account(b"pw", "alice", "hunter2").unwrap();

        let sealed = &vault.accounts["alice"];
        assert!(!sealed.windows(7).any(|w| w == b"hunter2"));
        let opened = decrypt_under_passphrase(b"pw", sealed, &fast().secret_kdf).unwrap();
        assert_eq!(opened.as_slice(), b"hunter2");
    }

    #[test]
    fn wrong_passphrase_leaves_map_untouched() {
        let mut vault = Vault::create_with_params(b"pw", fast()).unwrap();
        vault.add_account(b"pw", "alice", "a").unwrap();

        let err = vault.add_account(b"nope", "bob", "b").unwrap_err();
        assert!(matches!(err, PwVaultError::MasterMismatch));
        let err = vault.remove_account(b"nope", "alice").unwrap_err();
        assert!(matches!(err, PwVaultError::MasterMismatch));

        assert_eq!(vault.account_count(), 1);
        assert!(vault.contains_account("alice"));
        assert!(!vault.contains_account("bob"));
    }

    #[test]
    fn missing_account_is_reported_before_passphrase_check() {
        let vault = Vault::create_with_params(b"pw", fast()).unwrap();
        let err = vault.get_secret(b"wrong", "ghost").unwrap_err();
        assert!(matches!(err, PwVaultError::AccountNotFound(name) if name == "ghost"));
    }

    #[test]
    fn serialize_requires_master_passphrase() {
        let vault = Vault::create_with_params(b"pw", fast()).unwrap();
        let err = vault.serialize(b"not-pw").unwrap_err();
        assert!(matches!(err, PwVaultError::MasterMismatch));
    }

    #[test]
    fn non_utf8_secret_is_a_decode_error() {
        let mut vault = Vault::create_with_params(b"pw", fast()).unwrap();
        let sealed = encrypt_under_passphrase(b"pw", &[0xFF, 0xFE], &fast().secret_kdf).unwrap();
        vault.accounts.insert("raw".to_string(), sealed);

        let err = vault.get_secret(b"pw", "raw").unwrap_err();
        assert!(matches!(err, PwVaultError::DecodeError(_)));
    }
}
