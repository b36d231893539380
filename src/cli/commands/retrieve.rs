//! `passvault retrieve` — check the passkey and print a secret's text.

use crate::cli::{login, prompt_passkey, Cli};
use crate::errors::Result;

/// Execute the `retrieve` command.
pub fn execute(cli: &Cli, title: &str) -> Result<()> {
    let (session, vault) = login(cli)?;

    let passkey = prompt_passkey()?;
    let text = vault.retrieve(&session, title, &passkey)?;

    // Plaintext goes to stdout alone so it can be piped.
    println!("{text}");

    Ok(())
}
