//! `passvault register` — create a new account.

use crate::cli::output;
use crate::cli::{prompt_new_password, resolve_username, Cli, Context};
use crate::errors::{PassvaultError, Result};

/// Execute the `register` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let mut credentials = ctx.credentials()?;

    let username = resolve_username(cli)?;
    if credentials.contains(&username) {
        // Fail before asking for a password nobody will use.
        return Err(PassvaultError::DuplicateUser(username));
    }

    let password = prompt_new_password()?;
    credentials.register(&username, &password)?;

    output::success(&format!("Registered '{username}'. You can now store secrets."));
    output::tip("Run `passvault store <TITLE>` to add a secret.");

    Ok(())
}
