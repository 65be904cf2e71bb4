//! `pwvault list`: display all account usernames in a table.

use crate::cli::output;
use crate::cli::{prompt_password, resolve_vault, Cli};
use crate::errors::Result;
use crate::vault::load_vault;

/// Execute the `list` command.
///
/// Usernames are not secret, but they live inside the encrypted vault
/// file, so the passphrase is still needed to read them.
pub fn execute(cli: &Cli) -> Result<()> {
    let (path, params) = resolve_vault(cli)?;

    let password = prompt_password("Enter master passphrase")?;
    let vault = load_vault(&path, password.as_bytes(), params)?;

    let accounts = vault.list_accounts();

    output::info(&format!("{}: {} account(s)", path.display(), accounts.len()));
    output::print_accounts_table(&accounts);

    Ok(())
}
