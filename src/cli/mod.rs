//! Command-line interface: argument parser, output helpers and commands.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PwVaultError, Result};
use crate::vault::VaultParams;

/// Minimum master passphrase length to prevent trivially weak vaults.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting for the passphrase.
pub const PASSWORD_ENV: &str = "PWVAULT_PASSWORD";

/// pwvault CLI: passphrase-protected password vault.
#[derive(Parser)]
#[command(name = "pwvault", about = "Passphrase-protected password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: `vault_file` from .pwvault.toml, else vault.pwv)
    #[arg(short, long, global = true, env = "PWVAULT_FILE")]
    pub file: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Add an account (existing accounts are never overwritten)
    Add {
        /// Account username
        username: String,
        /// Account password (omit for interactive prompt)
        value: Option<String>,
    },

    /// Print an account's password
    Get {
        /// Account username
        username: String,
    },

    /// Remove an account
    Remove {
        /// Account username
        username: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List account usernames
    List,

    /// Interactive session (ls, add, rm, get, save)
    Shell,

    /// Encrypt any file under a passphrase
    Encrypt {
        /// File to encrypt
        #[arg(value_name = "FILE")]
        input: PathBuf,
        /// Where to write the result (default: overwrite FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a file produced by `encrypt`
    Decrypt {
        /// File to decrypt
        #[arg(value_name = "FILE")]
        input: PathBuf,
        /// Where to write the result (default: overwrite FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the vault file and its parameters from `.pwvault.toml` in the
/// current directory, honouring `--file`.
pub fn resolve_vault(cli: &Cli) -> Result<(PathBuf, VaultParams)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let path = match &cli.file {
        Some(file) => cwd.join(file),
        None => settings.vault_path(&cwd),
    };
    Ok((path, settings.vault_params()))
}

/// Get the master passphrase, trying in order:
/// 1. `PWVAULT_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (`init`, `encrypt`).
///
/// A mismatched confirmation simply asks again.  Also respects
/// `PWVAULT_PASSWORD`.  Enforces a minimum length.
pub fn prompt_new_password(prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        if pw.len() < MIN_PASSWORD_LEN {
            return Err(PwVaultError::CommandFailed(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(prompt)
                .with_confirmation("Confirm passphrase", "Passphrases do not match, try again")
                .interact()
                .map_err(|e| PwVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Passphrase must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(password);
    }
}

/// Get an account's secret from one of three sources:
/// 1. An inline value on the command line
/// 2. Piped stdin
/// 3. Hidden prompt with confirmation
pub fn read_secret(username: &str, inline: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(v) = inline {
        output::warning("Value provided on command line: it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed_len = buf.trim_end().len();
        buf.truncate(trimmed_len);
        return Ok(buf);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for {username}"))
        .with_confirmation("Confirm password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("input prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}
