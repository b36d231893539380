//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` wraps the JSON persistence layer and the crypto layer
//! so the rest of the application works with simple calls like
//! `vault.store(&session, "note", "hello", "p@ss")`.  Every operation
//! is scoped to the username carried by the `Session`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::secret::{self, EntryMetadata, Receipt, SecretRecord};
use crate::auth::Session;
use crate::crypto::{digest, SecretCipher};
use crate::errors::{PassvaultError, Result};
use crate::storage;

/// Title -> record, in insertion order.
type UserSecrets = IndexMap<String, SecretRecord>;

/// Username -> that user's secrets.
type SecretMap = IndexMap<String, UserSecrets>;

/// The main vault handle.  Open one with `VaultStore::open`, then pass
/// a `Session` to every operation.
pub struct VaultStore {
    /// Path to `data.json` on disk.
    path: PathBuf,

    /// In-memory copy of the whole file.
    secrets: SecretMap,

    /// Passkey-keyed cipher (carries the KDF work factor).
    cipher: SecretCipher,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Load the secrets file at `path`.  An absent file is an empty vault.
    pub fn open(path: &Path, cipher: SecretCipher) -> Result<Self> {
        let secrets: SecretMap = storage::read_json(path)?;
        tracing::debug!(
            path = %path.display(),
            users = secrets.len(),
            iterations = cipher.kdf().iterations(),
            "opened vault"
        );
        Ok(Self {
            path: path.to_path_buf(),
            secrets,
            cipher,
        })
    }

    // ------------------------------------------------------------------
    // Secret operations
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` under `passkey` and save it as `title`.
    ///
    /// An existing entry with the same title is replaced without
    /// warning (the receipt reports it).  The whole file is rewritten
    /// before this returns.
    pub fn store(
        &mut self,
        session: &Session,
        title: &str,
        plaintext: &str,
        passkey: &str,
    ) -> Result<Receipt> {
        if title.is_empty() {
            return Err(PassvaultError::MissingField("title"));
        }
        if plaintext.is_empty() {
            return Err(PassvaultError::MissingField("text"));
        }
        if passkey.is_empty() {
            return Err(PassvaultError::MissingField("passkey"));
        }

        let record = SecretRecord {
            ciphertext: self.cipher.encrypt(plaintext, passkey)?,
            passkey_hash: digest::sha256_hex(passkey),
            created_at: secret::now(),
        };
        let receipt_token = record.ciphertext.clone();
        let created_at = record.created_at;

        let user = session.username();
        let previous = self
            .secrets
            .entry(user.to_string())
            .or_default()
            .insert(title.to_string(), record);
        let replaced = previous.is_some();

        if let Err(e) = self.save() {
            self.rollback(user, title, previous);
            return Err(e);
        }

        tracing::info!(user, title, replaced, "stored secret");

        Ok(Receipt {
            title: title.to_string(),
            ciphertext: receipt_token,
            created_at,
            replaced,
        })
    }

    /// Check `passkey` against the entry and return the decrypted text.
    ///
    /// The digest comparison happens first, so a wrong passkey never
    /// reaches the cipher.
    pub fn retrieve(&self, session: &Session, title: &str, passkey: &str) -> Result<String> {
        let user = session.username();
        let record = self
            .secrets
            .get(user)
            .and_then(|entries| entries.get(title))
            .ok_or_else(|| PassvaultError::NoSuchEntry(title.to_string()))?;

        if !digest::verify(passkey, &record.passkey_hash) {
            tracing::warn!(user, title, "passkey check failed");
            return Err(PassvaultError::IncorrectPasskey);
        }

        let plaintext = self.cipher.decrypt(&record.ciphertext, passkey)?;
        tracing::debug!(user, title, "retrieved secret");
        Ok(plaintext)
    }

    /// Titles owned by the session's user, in insertion order.
    pub fn list_titles(&self, session: &Session) -> Vec<String> {
        self.secrets
            .get(session.username())
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Titles with their timestamps, in insertion order.
    pub fn list_entries(&self, session: &Session) -> Vec<EntryMetadata> {
        self.secrets
            .get(session.username())
            .map(|entries| {
                entries
                    .iter()
                    .map(|(title, record)| EntryMetadata {
                        title: title.clone(),
                        created_at: record.created_at,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of entries owned by the session's user.
    pub fn entry_count(&self, session: &Session) -> usize {
        self.secrets
            .get(session.username())
            .map_or(0, IndexMap::len)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Rewrite the whole secrets file.
    fn save(&self) -> Result<()> {
        storage::write_json(&self.path, &self.secrets)
    }

    /// Undo an in-memory insert after a failed save.
    fn rollback(&mut self, user: &str, title: &str, previous: Option<SecretRecord>) {
        let Some(entries) = self.secrets.get_mut(user) else {
            return;
        };
        match previous {
            Some(old) => {
                entries.insert(title.to_string(), old);
            }
            None => {
                entries.shift_remove(title);
                if entries.is_empty() {
                    self.secrets.shift_remove(user);
                }
            }
        }
    }
}
