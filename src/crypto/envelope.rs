//! AES-256-GCM envelope framing.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and writes
//! the KDF salt and the nonce in front of the ciphertext.  `open` splits
//! them back out before decrypting.
//!
//! Layout of an envelope:
//!   [ 16-byte salt | 12-byte nonce | ciphertext + 16-byte auth tag ]
//!
//! The fixed-width prefixes make the blob self-describing; no header,
//! version byte or magic is present.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use super::fill_random;
use super::kdf::{KEY_LEN, SALT_LEN};
use crate::errors::{PwVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the salt + nonce prefix.
pub const PREFIX_LEN: usize = SALT_LEN + NONCE_LEN;

/// Borrowed view of an envelope's three regions.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeParts<'a> {
    pub salt: &'a [u8; SALT_LEN],
    pub nonce: &'a [u8; NONCE_LEN],
    pub ciphertext: &'a [u8],
}

/// Split an envelope into salt, nonce and sealed ciphertext.
///
/// Fails with `MalformedEnvelope` if the blob cannot even hold the
/// salt and nonce prefix.
pub fn split(envelope: &[u8]) -> Result<EnvelopeParts<'_>> {
    if envelope.len() < PREFIX_LEN {
        return Err(PwVaultError::MalformedEnvelope);
    }

    let (salt, rest) = envelope.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    Ok(EnvelopeParts {
        salt: salt.try_into().map_err(|_| PwVaultError::MalformedEnvelope)?,
        nonce: nonce.try_into().map_err(|_| PwVaultError::MalformedEnvelope)?,
        ciphertext,
    })
}

/// Encrypt `plaintext` under a 32-byte `key`.
///
/// Returns salt || nonce || ciphertext-with-tag.  No associated data.
pub fn seal(key: &[u8], salt: &[u8; SALT_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;

    let mut nonce = [0u8; NONCE_LEN];
    fill_random(&mut nonce)?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| PwVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(PREFIX_LEN + ciphertext.len());
    output.extend_from_slice(salt);
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt an envelope produced by `seal`.
///
/// A wrong key and a tampered ciphertext both come back as
/// `AuthenticationFailure`; the two cases are not distinguished.
pub fn open(key: &[u8], envelope: &[u8]) -> Result<Vec<u8>> {
    let cipher = cipher_for(key)?;
    let parts = split(envelope)?;

    cipher
        .decrypt(Nonce::from_slice(parts.nonce), parts.ciphertext)
        .map_err(|_| PwVaultError::AuthenticationFailure)
}

fn cipher_for(key: &[u8]) -> Result<Aes256Gcm> {
    if key.len() != KEY_LEN {
        return Err(PwVaultError::InvalidKeyLength(key.len()));
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| PwVaultError::InvalidKeyLength(key.len()))
}
