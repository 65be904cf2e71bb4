use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::auth::AuthParams;
use crate::crypto::kdf::{KdfKind, KdfParams};
use crate::errors::{PwVaultError, Result};
use crate::vault::VaultParams;

/// Project-level configuration, loaded from `.pwvault.toml`.
///
/// Every field has a default matching format v1, so pwvault works
/// out-of-the-box without any config file at all.
///
/// The vault file has no header: changing `vault_*` or `secret_*`
/// after a vault was written makes it fail to open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file path (relative to the project directory).
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// KDF for the whole vault envelope (default: scrypt).
    #[serde(default = "default_vault_kdf")]
    pub vault_kdf: KdfKind,

    /// Cost for the whole vault envelope (default: 18).
    #[serde(default = "default_vault_cost")]
    pub vault_cost: u8,

    /// KDF for each secret envelope (default: argon2id).
    #[serde(default = "default_secret_kdf")]
    pub secret_kdf: KdfKind,

    /// Cost for each secret envelope (default: 14).
    #[serde(default = "default_secret_cost")]
    pub secret_cost: u8,

    /// Master hash memory cost in KiB (default: 19 MiB).
    #[serde(default = "default_auth_memory_kib")]
    pub auth_memory_kib: u32,

    /// Master hash iteration count (default: 2).
    #[serde(default = "default_auth_iterations")]
    pub auth_iterations: u32,

    /// Master hash parallelism (default: 1).
    #[serde(default = "default_auth_parallelism")]
    pub auth_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "vault.pwv".to_string()
}

fn default_vault_kdf() -> KdfKind {
    KdfParams::VAULT_V1.kind
}

fn default_vault_cost() -> u8 {
    KdfParams::VAULT_V1.cost
}

fn default_secret_kdf() -> KdfKind {
    KdfParams::SECRET_V1.kind
}

fn default_secret_cost() -> u8 {
    KdfParams::SECRET_V1.cost
}

fn default_auth_memory_kib() -> u32 {
    AuthParams::default().memory_kib
}

fn default_auth_iterations() -> u32 {
    AuthParams::default().iterations
}

fn default_auth_parallelism() -> u32 {
    AuthParams::default().parallelism
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            vault_kdf: default_vault_kdf(),
            vault_cost: default_vault_cost(),
            secret_kdf: default_secret_kdf(),
            secret_cost: default_secret_cost(),
            auth_memory_kib: default_auth_memory_kib(),
            auth_iterations: default_auth_iterations(),
            auth_parallelism: default_auth_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".pwvault.toml";

    /// Load settings from `<project_dir>/.pwvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PwVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Build the full path to the vault file.
    ///
    /// Example: `project_dir/vault.pwv`
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_file)
    }

    /// Convert the cost settings into vault-layer params.
    pub fn vault_params(&self) -> VaultParams {
        VaultParams {
            vault_kdf: KdfParams::new(self.vault_kdf, self.vault_cost),
            secret_kdf: KdfParams::new(self.secret_kdf, self.secret_cost),
            auth: AuthParams {
                memory_kib: self.auth_memory_kib,
                iterations: self.auth_iterations,
                parallelism: self.auth_parallelism,
            },
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
