//! Cryptographic primitives for pwvault.
//!
//! This module provides:
//! - Argon2id / scrypt passphrase-based key derivation (`kdf`)
//! - AES-256-GCM envelope framing: salt || nonce || ciphertext (`envelope`)
//! - One-call encrypt/decrypt under a passphrase (`encryption`)
//! - Master passphrase hashing and verification (`auth`)
//! - Zeroize-on-drop key material (`keys`)

pub mod auth;
pub mod encryption;
pub mod envelope;
pub mod kdf;
pub mod keys;

use rand::TryRngCore;

use crate::errors::{PwVaultError, Result};

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt_under_passphrase, KdfParams, ...};
pub use auth::{hash_passphrase, verify_passphrase, AuthParams, MasterHash};
pub use encryption::{decrypt_under_passphrase, encrypt_under_passphrase};
pub use envelope::{open, seal, NONCE_LEN};
pub use kdf::{derive_key, generate_salt, KdfKind, KdfParams, KEY_LEN, SALT_LEN};
pub use keys::DerivedKey;

/// Fill `buf` from the operating system's CSPRNG.
///
/// Salts and nonces both come from here.  A failing random source is
/// fatal to the calling operation.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    rand::rngs::OsRng
        .try_fill_bytes(buf)
        .map_err(|e| PwVaultError::EntropyUnavailable(e.to_string()))
}
