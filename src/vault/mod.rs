//! Vault module: encrypted account storage.
//!
//! This module provides:
//! - Length-prefixed binary encoding of the account map (`format`)
//! - The `Vault` aggregate with passphrase-checked operations (`store`)
//! - Atomic envelope reads and writes on disk (`file`)

pub mod file;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use file::{load_vault, read_envelope, save_vault, write_envelope};
pub use format::{decode_map, encode_map, AccountMap};
pub use store::{Vault, VaultParams};
