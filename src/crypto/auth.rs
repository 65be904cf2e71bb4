//! Master passphrase verification.
//!
//! The vault keeps a one-way Argon2id hash of the master passphrase in
//! PHC string form (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).  The
//! string carries its own salt and parameters, so `verify_passphrase`
//! never needs to know which `AuthParams` produced it.
//!
//! The work factor is deliberately lower than the envelope KDF cost:
//! this check runs on every mutating or revealing vault operation.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use super::fill_random;
use super::kdf::SALT_LEN;
use crate::errors::{PwVaultError, Result};

/// Argon2id parameters for the master passphrase hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthParams {
    /// Memory cost in KiB (default: 19 456 = 19 MiB).
    pub memory_kib: u32,
    /// Number of iterations (default: 2).
    pub iterations: u32,
    /// Parallelism lanes (default: 1).
    pub parallelism: u32,
}

impl Default for AuthParams {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// A salted, adaptive, one-way hash of the master passphrase.
///
/// Safe to keep in the clear: its one-wayness is the only protection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterHash(String);

impl MasterHash {
    /// The PHC string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Hash `passphrase` with a fresh random salt.
pub fn hash_passphrase(passphrase: &[u8], params: &AuthParams) -> Result<MasterHash> {
    let argon2_params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
        .map_err(|e| PwVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut salt_bytes = [0u8; SALT_LEN];
    fill_random(&mut salt_bytes)?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| PwVaultError::KeyDerivationFailed(format!("salt encoding failed: {e}")))?;

    let hash = argon2.hash_password(passphrase, &salt).map_err(|e| {
        PwVaultError::KeyDerivationFailed(format!("passphrase hashing failed: {e}"))
    })?;

    Ok(MasterHash(hash.to_string()))
}

/// Check `passphrase` against a stored hash.
///
/// The hash comparison is constant-time.  Every failure, including an
/// unparsable stored hash, is reported as the same `MasterMismatch`.
pub fn verify_passphrase(hash: &MasterHash, passphrase: &[u8]) -> Result<()> {
    let parsed = PasswordHash::new(&hash.0).map_err(|_| PwVaultError::MasterMismatch)?;

    Argon2::default()
        .verify_password(passphrase, &parsed)
        .map_err(|_| PwVaultError::MasterMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: AuthParams = AuthParams {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    };

    #[test]
    fn verify_accepts_the_hashed_passphrase() {
        let hash = hash_passphrase(b"master", &FAST).unwrap();
        assert!(verify_passphrase(&hash, b"master").is_ok());
    }

    #[test]
    fn verify_rejects_other_passphrases() {
        let hash = hash_passphrase(b"master", &FAST).unwrap();
        for wrong in [&b"Master"[..], b"master ", b""] {
            let err = verify_passphrase(&hash, wrong).unwrap_err();
            assert!(matches!(err, PwVaultError::MasterMismatch));
        }
    }

    #[test]
    fn hashes_are_self_salting() {
        let a = hash_passphrase(b"master", &FAST).unwrap();
        let b = hash_passphrase(b"master", &FAST).unwrap();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("$argon2id$"));
        assert!(!a.as_str().contains("master"));
    }

    #[test]
    fn stored_params_are_used_for_verification() {
        // Verification reads m/t/p from the PHC string, not the defaults.
        let custom = AuthParams {
            memory_kib: 128,
            iterations: 3,
            parallelism: 2,
        };
        let hash = hash_passphrase(b"master", &custom).unwrap();
        assert!(hash.as_str().contains("m=128,t=3,p=2"));
        assert!(verify_passphrase(&hash, b"master").is_ok());
    }

    #[test]
    fn garbage_hash_is_a_plain_mismatch() {
        let hash = MasterHash("not a phc string".to_string());
        let err = verify_passphrase(&hash, b"master").unwrap_err();
        assert!(matches!(err, PwVaultError::MasterMismatch));
    }
}
