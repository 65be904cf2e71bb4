//! Encrypt or decrypt one payload under a passphrase.
//!
//! Every encryption derives a brand-new key from a brand-new salt, so a
//! (key, nonce) pair can never repeat even though the nonce is random.
//! Used both for the whole vault and for each individual secret.

use zeroize::Zeroizing;

use super::envelope;
use super::kdf::{derive_key, KdfParams};
use crate::errors::Result;

/// Encrypt `plaintext` under `passphrase`.
///
/// Returns a full envelope: salt || nonce || ciphertext-with-tag.
pub fn encrypt_under_passphrase(
    passphrase: &[u8],
    plaintext: &[u8],
    params: &KdfParams,
) -> Result<Vec<u8>> {
    let (key, salt) = derive_key(passphrase, None, params)?;
    envelope::seal(key.as_bytes(), &salt, plaintext)
}

/// Decrypt an envelope produced by `encrypt_under_passphrase`.
///
/// The salt is read from the envelope and the key re-derived with the
/// same `params`.  A wrong passphrase, a wrong cost and a tampered
/// ciphertext all surface as `AuthenticationFailure`.
pub fn decrypt_under_passphrase(
    passphrase: &[u8],
    sealed: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<Vec<u8>>> {
    // Parse first so a malformed blob costs no KDF work.
    let parts = envelope::split(sealed)?;
    let (key, _) = derive_key(passphrase, Some(parts.salt.as_slice()), params)?;
    envelope::open(key.as_bytes(), sealed).map(Zeroizing::new)
}
