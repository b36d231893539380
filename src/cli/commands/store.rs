//! `passvault store` — encrypt a secret under a passkey and save it.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{login, prompt_new_passkey, Cli};
use crate::errors::{PassvaultError, Result};

/// Execute the `store` command.
pub fn execute(cli: &Cli, title: &str, text: Option<&str>) -> Result<()> {
    let (session, mut vault) = login(cli)?;

    // Determine the secret text from one of three sources.
    let secret_text = Zeroizing::new(if let Some(t) = text {
        // Source 1: Inline text on the command line.
        output::warning("Secret provided on command line — it may appear in shell history.");
        t.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive prompt (default).
        dialoguer::Input::<String>::new()
            .with_prompt("Secret text")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PassvaultError::CommandFailed(format!("input prompt: {e}")))?
    });

    let passkey = prompt_new_passkey()?;
    let receipt = vault.store(&session, title, &secret_text, &passkey)?;

    if receipt.replaced {
        output::success(&format!(
            "'{}' replaced ({} total)",
            receipt.title,
            vault.entry_count(&session)
        ));
    } else {
        output::success(&format!(
            "'{}' encrypted and saved ({} total)",
            receipt.title,
            vault.entry_count(&session)
        ));
    }

    output::info(&format!("Encrypted text: {}", receipt.ciphertext));
    output::info(&format!(
        "Timestamp: {}",
        receipt
            .created_at
            .format(crate::vault::secret::TIMESTAMP_FORMAT)
    ));
    output::tip("Run `passvault retrieve <TITLE>` to decrypt it again.");

    Ok(())
}
