//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::{CredentialStore, Session};
use crate::config::Settings;
use crate::crypto::SecretCipher;
use crate::errors::{PassvaultError, Result};
use crate::vault::VaultStore;

/// Environment variable consulted before prompting for the account password.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// Environment variable consulted before prompting for an entry passkey.
pub const PASSKEY_ENV: &str = "PASSVAULT_PASSKEY";

/// Passvault CLI: passkey-protected secret notes.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Store short secrets, each locked with its own passkey",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding users.json, data.json and passvault.toml
    #[arg(long, default_value = ".", env = "PASSVAULT_DATA_DIR", global = true)]
    pub data_dir: PathBuf,

    /// Account to act as (prompted if omitted)
    #[arg(short, long, env = "PASSVAULT_USER", global = true)]
    pub user: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new account
    Register,

    /// Encrypt a secret under a passkey and save it
    Store {
        /// Title to save the secret under (overwrites an existing one)
        title: String,
        /// Secret text (omit to read stdin or prompt)
        text: Option<String>,
    },

    /// Decrypt and print a secret
    Retrieve {
        /// Title of the secret
        title: String,
    },

    /// List your saved titles
    List,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved settings plus the paths they point at.
pub struct Context {
    pub settings: Settings,
    pub data_dir: PathBuf,
}

impl Context {
    /// Load `passvault.toml` from the data directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let settings = Settings::load(&cli.data_dir)?;
        Ok(Self {
            settings,
            data_dir: cli.data_dir.clone(),
        })
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        CredentialStore::open(&self.settings.users_path(&self.data_dir))
    }

    pub fn vault(&self) -> Result<VaultStore> {
        let cipher = SecretCipher::new(self.settings.kdf()?);
        VaultStore::open(&self.settings.secrets_path(&self.data_dir), cipher)
    }
}

/// Authenticate the CLI user and open their vault.
pub fn login(cli: &Cli) -> Result<(Session, VaultStore)> {
    let ctx = Context::load(cli)?;
    let credentials = ctx.credentials()?;

    let username = resolve_username(cli)?;
    let password = prompt_password()?;
    let session = credentials.authenticate(&username, &password)?;

    let vault = ctx.vault()?;
    Ok((session, vault))
}

/// Username from `--user` / `PASSVAULT_USER`, or an interactive prompt.
pub fn resolve_username(cli: &Cli) -> Result<String> {
    if let Some(user) = cli.user.as_deref() {
        return Ok(user.to_string());
    }

    dialoguer::Input::<String>::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(|e| PassvaultError::CommandFailed(format!("username prompt: {e}")))
}

/// Get the account password, from `PASSVAULT_PASSWORD` or a prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    secret_from_env_or_prompt(PASSWORD_ENV, "Password", None)
}

/// Prompt for a new account password with confirmation (used by `register`).
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    secret_from_env_or_prompt(PASSWORD_ENV, "Choose password", Some("Confirm password"))
}

/// Get the passkey for an existing entry.
pub fn prompt_passkey() -> Result<Zeroizing<String>> {
    secret_from_env_or_prompt(PASSKEY_ENV, "Passkey", None)
}

/// Prompt for a new entry passkey with confirmation (used by `store`).
pub fn prompt_new_passkey() -> Result<Zeroizing<String>> {
    secret_from_env_or_prompt(PASSKEY_ENV, "Create passkey", Some("Confirm passkey"))
}

/// Read a secret from `env_var` if set and non-empty, else prompt for it.
///
/// An empty answer is passed through; the stores reject it with
/// `MissingField`.
fn secret_from_env_or_prompt(
    env_var: &str,
    prompt: &str,
    confirmation: Option<&str>,
) -> Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var(env_var) {
        if !value.is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }

    let mut input = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true);
    if let Some(confirm) = confirmation {
        input = input.with_confirmation(confirm, "Entries do not match, try again");
    }

    let value = input
        .interact()
        .map_err(|e| PassvaultError::CommandFailed(format!("{prompt} prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}
