//! `pwvault shell`: interactive session over one in-memory vault.
//!
//! Opens the vault once, then reads commands until `q`.  Changes stay in
//! memory until `save`; quitting without saving discards them.  Every
//! command that reveals or changes data asks for the master passphrase
//! again.

use std::path::{Path, PathBuf};

use dialoguer::Input;

use crate::cli::output;
use crate::cli::{prompt_new_password, prompt_password, read_secret, resolve_vault, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::{load_vault, save_vault, Vault};

const HELP: &[(&str, &str)] = &[
    ("q", "exit (unsaved changes are discarded)"),
    ("ls", "list accounts"),
    ("add", "add an account"),
    ("rm", "remove an account"),
    ("get", "print an account's password"),
    ("save", "encrypt the vault and write it to a file (blank = current)"),
];

/// Execute the `shell` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (path, params) = resolve_vault(cli)?;

    let mut vault = if path.exists() {
        let password = prompt_password("Enter master passphrase")?;
        load_vault(&path, password.as_bytes(), params)?
    } else {
        output::info(&format!("No vault at {}, creating a new one.", path.display()));
        let password = prompt_new_password("Choose master passphrase")?;
        Vault::create_with_params(password.as_bytes(), params)?
    };

    output::info("Welcome to pwvault. Type `help` for commands.");

    loop {
        let command: String = ask("pwvault")?;

        let result = match command.trim().to_lowercase().as_str() {
            "q" | "quit" | "exit" => return Ok(()),
            "help" => {
                for (name, about) in HELP {
                    println!("  {name:<6} {about}");
                }
                Ok(())
            }
            "ls" => {
                output::print_accounts_table(&vault.list_accounts());
                Ok(())
            }
            "add" => add(&mut vault),
            "rm" => remove(&mut vault),
            "get" => get(&vault),
            "save" => save(&vault, &path),
            "" => Ok(()),
            other => {
                output::warning(&format!("Unknown command '{other}'."));
                Ok(())
            }
        };

        // A failed command never ends the session.
        if let Err(e) = result {
            output::error(&e.to_string());
        }
    }
}

fn add(vault: &mut Vault) -> Result<()> {
    let username = ask("Username")?;
    let secret = read_secret(&username, None)?;
    let password = prompt_password("Master passphrase to confirm new account")?;

    vault.add_account(password.as_bytes(), &username, &secret)?;
    output::success(&format!("Account '{username}' added (not saved yet)"));
    Ok(())
}

fn remove(vault: &mut Vault) -> Result<()> {
    let username = ask("Username")?;
    let password = prompt_password("Master passphrase to remove account")?;

    vault.remove_account(password.as_bytes(), &username)?;
    output::success(&format!("Removed account '{username}' (not saved yet)"));
    Ok(())
}

fn get(vault: &Vault) -> Result<()> {
    let username = ask("Username")?;
    let password = prompt_password("Master passphrase to reveal password")?;

    let secret = vault.get_secret(password.as_bytes(), &username)?;
    println!("Password: [{}]", secret.as_str());
    Ok(())
}

fn save(vault: &Vault, path: &Path) -> Result<()> {
    let answer = ask(&format!("File to save to [{}]", path.display()))?;
    let target = save_target(&answer, path);
    let password = prompt_password("Master passphrase to save vault")?;

    save_vault(vault, &target, password.as_bytes())?;
    output::success(&format!("Vault saved to {}", target.display()));
    Ok(())
}

/// A blank answer keeps the vault's own path.
fn save_target(answer: &str, current: &Path) -> PathBuf {
    match answer.trim() {
        "" => current.to_path_buf(),
        other => PathBuf::from(other),
    }
}

fn ask(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| PwVaultError::CommandFailed(format!("input prompt: {e}")))
}
