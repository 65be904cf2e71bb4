//! `pwvault add`: add a new account to the vault.

use crate::cli::output;
use crate::cli::{prompt_password, read_secret, resolve_vault, Cli};
use crate::errors::Result;
use crate::vault::{load_vault, save_vault};

/// Execute the `add` command.
pub fn execute(cli: &Cli, username: &str, value: Option<&str>) -> Result<()> {
    let (path, params) = resolve_vault(cli)?;

    let secret = read_secret(username, value)?;

    // Open the vault, add the account, and save.
    let password = prompt_password("Enter master passphrase")?;
    let mut vault = load_vault(&path, password.as_bytes(), params)?;

    vault.add_account(password.as_bytes(), username, &secret)?;
    save_vault(&vault, &path, password.as_bytes())?;

    output::success(&format!(
        "Account '{}' added ({} total)",
        username,
        vault.account_count()
    ));

    Ok(())
}
