use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{Kdf, DEFAULT_ITERATIONS};
use crate::errors::{PassvaultError, Result};

/// Data-directory configuration, loaded from `passvault.toml`.
///
/// Every field has a sensible default so Passvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Account file name (relative to the data directory).
    #[serde(default = "default_users_file")]
    pub users_file: String,

    /// Secrets file name (relative to the data directory).
    #[serde(default = "default_secrets_file")]
    pub secrets_file: String,

    /// PBKDF2 iteration count for passkey stretching (default: 100 000).
    ///
    /// Entries written with one count cannot be opened with another.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_secrets_file() -> String {
    "data.json".to_string()
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
            secrets_file: default_secrets_file(),
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the data directory.
    const FILE_NAME: &'static str = "passvault.toml";

    /// Load settings from `<data_dir>/passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassvaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Full path to the account file.
    pub fn users_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.users_file)
    }

    /// Full path to the secrets file.
    pub fn secrets_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.secrets_file)
    }

    /// Convert the KDF setting into crypto-layer params.
    pub fn kdf(&self) -> Result<Kdf> {
        Kdf::with_iterations(self.kdf_iterations)
            .map_err(|e| PassvaultError::ConfigError(format!("kdf_iterations: {e}")))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
