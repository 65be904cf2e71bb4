//! `pwvault remove`: remove an account from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{prompt_password, resolve_vault, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::{load_vault, save_vault};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, username: &str, force: bool) -> Result<()> {
    let (path, params) = resolve_vault(cli)?;

    // Unless --force is set, ask for confirmation before removing.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove account '{username}'?"))
            .default(false)
            .interact()
            .map_err(|e| PwVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    // Open the vault (requires passphrase).
    let password = prompt_password("Enter master passphrase")?;
    let mut vault = load_vault(&path, password.as_bytes(), params)?;

    // Remove the account and save.
    vault.remove_account(password.as_bytes(), username)?;
    save_vault(&vault, &path, password.as_bytes())?;

    output::success(&format!("Removed account '{username}'"));

    Ok(())
}
