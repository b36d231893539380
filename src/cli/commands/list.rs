//! `passvault list` — display the user's titles in a table.

use crate::cli::output;
use crate::cli::{login, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (session, vault) = login(cli)?;

    let entries = vault.list_entries(&session);

    output::info(&format!(
        "{} — {} secret(s)",
        session.username(),
        entries.len()
    ));

    output::print_entries_table(&entries);

    Ok(())
}
