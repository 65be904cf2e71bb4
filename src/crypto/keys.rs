//! Key material that wipes itself.
//!
//! `DerivedKey` holds the 32-byte output of the KDF for exactly as long
//! as one seal/open takes.  Its bytes are zeroed when it is dropped.
//!
//! This is best-effort: copies made by the compiler, by the allocator,
//! or by the OS paging memory to swap are out of reach.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::kdf::KEY_LEN;

/// A 32-byte symmetric key derived from a passphrase.
///
/// Never persisted.  Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}
