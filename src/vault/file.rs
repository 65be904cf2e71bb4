//! Reading and writing the vault envelope on disk.
//!
//! The file is the envelope and nothing else.  Writes go through a
//! uniquely named temp file in the same directory followed by a rename,
//! so readers never see a half-written vault and concurrent writers never
//! share a temp file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::{PwVaultError, Result};

use super::store::{Vault, VaultParams};

/// Read the raw envelope bytes from `path`.
pub fn read_envelope(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(PwVaultError::VaultNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Write `envelope` to `path` **atomically**.
///
/// The temp file is in the same directory so the rename stays on one
/// filesystem.  On Unix it is created owner-only (0600) and keeps that
/// mode after the rename.
pub fn write_envelope(path: &Path, envelope: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(envelope)?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| PwVaultError::Io(e.error))?;
    Ok(())
}

/// Read and unlock the vault stored at `path`.
pub fn load_vault(path: &Path, passphrase: &[u8], params: VaultParams) -> Result<Vault> {
    let envelope = read_envelope(path)?;
    Vault::open_with_params(passphrase, &envelope, params)
}

/// Encrypt `vault` and write it to `path`.
pub fn save_vault(vault: &Vault, path: &Path, passphrase: &[u8]) -> Result<()> {
    let envelope = vault.serialize(passphrase)?;
    write_envelope(path, &envelope)
}
