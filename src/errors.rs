use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in pwvault.
#[derive(Debug, Error)]
pub enum PwVaultError {
    // --- Key derivation errors ---
    #[error("Salt must be exactly {expected} bytes (got {actual})")]
    InvalidSaltLength { expected: usize, actual: usize },

    #[error("Cost {0} is out of range (expected 1..=24)")]
    InvalidCost(u8),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Random source unavailable: {0}")]
    EntropyUnavailable(String),

    // --- Envelope errors ---
    #[error("Key must be exactly 32 bytes (got {0})")]
    InvalidKeyLength(usize),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Envelope is too short to hold a salt and nonce")]
    MalformedEnvelope,

    #[error("Authentication failed: wrong passphrase or corrupted data")]
    AuthenticationFailure,

    // --- Vault errors ---
    #[error("Master passphrase does not match")]
    MasterMismatch,

    #[error("Account '{0}' already exists")]
    DuplicateAccount(String),

    #[error("Account '{0}' not found")]
    AccountNotFound(String),

    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    // --- Codec errors ---
    #[error("Vault data is truncated")]
    TruncatedData,

    #[error("Vault data is invalid: {0}")]
    DecodeError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for pwvault results.
pub type Result<T> = std::result::Result<T, PwVaultError>;
