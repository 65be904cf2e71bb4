//! Passphrase-based key derivation.
//!
//! Two interchangeable KDFs turn a passphrase + 16-byte salt + cost into
//! a 32-byte AES-256 key:
//!
//! - **Argon2id**: iterations = cost, memory = 2^cost KiB, 4 lanes.
//! - **scrypt**: N = 2^cost, r = 8, p = 1.
//!
//! The same passphrase, salt, cost and kind always produce the same key.
//! That is what lets decryption rebuild the key from the salt stored at
//! the front of an envelope.

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::fill_random;
use super::keys::DerivedKey;
use crate::errors::{PwVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Smallest accepted cost.
pub const MIN_COST: u8 = 1;

/// Largest accepted cost.
///
/// At 24 both KDFs already need 16 GiB.  Anything higher would abort the
/// process on allocation failure instead of returning an error.
pub const MAX_COST: u8 = 24;

/// Argon2id lane count, fixed for every call site.
const ARGON2_PARALLELISM: u32 = 4;

/// scrypt block size.
const SCRYPT_R: u32 = 8;

/// scrypt parallelism, fixed for every call site.
const SCRYPT_P: u32 = 1;

/// Which KDF stretches the passphrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdfKind {
    Argon2id,
    Scrypt,
}

impl fmt::Display for KdfKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argon2id => f.write_str("argon2id"),
            Self::Scrypt => f.write_str("scrypt"),
        }
    }
}

/// A KDF choice plus its logarithmic work factor.
///
/// Must be identical between encryption and decryption or the derived
/// key differs and the envelope fails to authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub kind: KdfKind,
    pub cost: u8,
}

impl KdfParams {
    /// Format v1 whole-vault envelope: scrypt, N = 2^18.
    pub const VAULT_V1: Self = Self::new(KdfKind::Scrypt, 18);

    /// Format v1 per-secret envelope: Argon2id, cost 14.
    pub const SECRET_V1: Self = Self::new(KdfKind::Argon2id, 14);

    pub const fn new(kind: KdfKind, cost: u8) -> Self {
        Self { kind, cost }
    }
}

/// Derive a 32-byte key from `passphrase`.
///
/// With `salt = None` a fresh random salt is generated.  A supplied salt
/// must be exactly `SALT_LEN` bytes.  The salt actually used is returned
/// alongside the key so the caller can store it.
pub fn derive_key(
    passphrase: &[u8],
    salt: Option<&[u8]>,
    params: &KdfParams,
) -> Result<(DerivedKey, [u8; SALT_LEN])> {
    if !(MIN_COST..=MAX_COST).contains(&params.cost) {
        return Err(PwVaultError::InvalidCost(params.cost));
    }

    let salt = match salt {
        Some(bytes) => <[u8; SALT_LEN]>::try_from(bytes).map_err(|_| {
            PwVaultError::InvalidSaltLength {
                expected: SALT_LEN,
                actual: bytes.len(),
            }
        })?,
        None => generate_salt()?,
    };

    tracing::debug!(kdf = %params.kind, cost = params.cost, "deriving key");

    let mut key = [0u8; KEY_LEN];
    let derived = match params.kind {
        KdfKind::Argon2id => argon2id_into(passphrase, &salt, params.cost, &mut key),
        KdfKind::Scrypt => scrypt_into(passphrase, &salt, params.cost, &mut key),
    };
    let result = derived.map(|()| DerivedKey::new(key));
    key.zeroize();

    Ok((result?, salt))
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    fill_random(&mut salt)?;
    Ok(salt)
}

fn argon2id_into(passphrase: &[u8], salt: &[u8], cost: u8, out: &mut [u8]) -> Result<()> {
    let params = Params::new(
        1u32 << cost,
        u32::from(cost),
        ARGON2_PARALLELISM,
        Some(KEY_LEN),
    )
    .map_err(|e| PwVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(passphrase, salt, out)
        .map_err(|e| PwVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))
}

fn scrypt_into(passphrase: &[u8], salt: &[u8], cost: u8, out: &mut [u8]) -> Result<()> {
    let params = scrypt::Params::new(cost, SCRYPT_R, SCRYPT_P)
        .map_err(|e| PwVaultError::KeyDerivationFailed(format!("invalid scrypt params: {e}")))?;

    scrypt::scrypt(passphrase, salt, &params, out)
        .map_err(|e| PwVaultError::KeyDerivationFailed(format!("scrypt failed: {e}")))
}
