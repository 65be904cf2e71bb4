//! `pwvault decrypt`: reverse `pwvault encrypt`.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{prompt_password, resolve_vault, Cli};
use crate::crypto::decrypt_under_passphrase;
use crate::errors::Result;
use crate::vault::write_envelope;

/// Execute the `decrypt` command.
///
/// A wrong passphrase or a different `vault_kdf`/`vault_cost` than the
/// file was encrypted with fails authentication and writes nothing.
pub fn execute(cli: &Cli, input: &Path, out: Option<&Path>) -> Result<()> {
    let (_, params) = resolve_vault(cli)?;

    let sealed = fs::read(input)?;
    let password = prompt_password("Enter the file's passphrase")?;

    output::info(&format!("Decrypting {}", input.display()));
    let plaintext = decrypt_under_passphrase(password.as_bytes(), &sealed, &params.vault_kdf)?;

    let target = out.unwrap_or(input);
    write_envelope(target, &plaintext)?;

    output::success(&format!("Wrote {}", target.display()));
    Ok(())
}
