//! `pwvault init`: create a new, empty vault file.

use crate::cli::output;
use crate::cli::{prompt_new_password, resolve_vault, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::{save_vault, Vault};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (path, params) = resolve_vault(cli)?;

    // 1. Refuse to clobber an existing vault.
    if path.exists() {
        output::tip("Use `pwvault add` to add accounts to the existing vault.");
        return Err(PwVaultError::VaultAlreadyExists(path));
    }

    // 2. Prompt for a new passphrase (with confirmation).
    let password = prompt_new_password("Choose master passphrase")?;

    // 3. Create the vault in memory and write it out.
    let vault = Vault::create_with_params(password.as_bytes(), params)?;
    save_vault(&vault, &path, password.as_bytes())?;

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `pwvault add <USERNAME>` to add an account.");
    output::tip("Run `pwvault list` to see all accounts.");

    Ok(())
}
