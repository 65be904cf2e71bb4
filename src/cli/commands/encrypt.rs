//! `pwvault encrypt`: seal an arbitrary file under its own passphrase.
//!
//! Uses the whole-vault KDF settings, so the output is a plain envelope
//! with no vault inside.  Without `-o` the input file is replaced.

use std::fs;
use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{prompt_new_password, resolve_vault, Cli};
use crate::crypto::encrypt_under_passphrase;
use crate::errors::Result;
use crate::vault::write_envelope;

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, input: &Path, out: Option<&Path>) -> Result<()> {
    let (_, params) = resolve_vault(cli)?;

    let contents = Zeroizing::new(fs::read(input)?);
    let password = prompt_new_password("Choose a passphrase for this file")?;

    output::info(&format!("Encrypting {}", input.display()));
    let sealed = encrypt_under_passphrase(password.as_bytes(), &contents, &params.vault_kdf)?;

    let target = out.unwrap_or(input);
    write_envelope(target, &sealed)?;

    output::success(&format!("Wrote {}", target.display()));
    Ok(())
}
