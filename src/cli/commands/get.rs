//! `pwvault get`: retrieve and print a single account's password.

use crate::cli::{prompt_password, resolve_vault, Cli};
use crate::errors::Result;
use crate::vault::load_vault;

/// Execute the `get` command.
pub fn execute(cli: &Cli, username: &str) -> Result<()> {
    let (path, params) = resolve_vault(cli)?;

    // Open the vault (requires passphrase).
    let password = prompt_password("Enter master passphrase")?;
    let vault = load_vault(&path, password.as_bytes(), params)?;

    // Decrypt and print the password to stdout.
    let secret = vault.get_secret(password.as_bytes(), username)?;
    println!("{}", secret.as_str());

    Ok(())
}
