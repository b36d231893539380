//! Account registry backed by `users.json`.
//!
//! The file maps each username to the SHA-256 hex digest of its
//! password.  There is no per-user salt and no slow KDF on this path;
//! that keeps old account files valid but makes the digests cheap to
//! brute-force if the file leaks.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::session::Session;
use crate::crypto::digest;
use crate::errors::{PassvaultError, Result};
use crate::storage;

/// Username -> password digest, in registration order.
type UserMap = IndexMap<String, String>;

/// Handle on the account file.
pub struct CredentialStore {
    path: PathBuf,
    users: UserMap,
}

impl CredentialStore {
    /// Load the account file at `path` (an absent file means no users).
    pub fn open(path: &Path) -> Result<Self> {
        let users: UserMap = storage::read_json(path)?;
        tracing::debug!(path = %path.display(), users = users.len(), "opened credential store");
        Ok(Self {
            path: path.to_path_buf(),
            users,
        })
    }

    /// Create a new account and persist it immediately.
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() {
            return Err(PassvaultError::MissingField("username"));
        }
        if password.is_empty() {
            return Err(PassvaultError::MissingField("password"));
        }
        if self.users.contains_key(username) {
            return Err(PassvaultError::DuplicateUser(username.to_string()));
        }

        self.users
            .insert(username.to_string(), digest::sha256_hex(password));

        if let Err(e) = storage::write_json(&self.path, &self.users) {
            // Keep memory consistent with what is on disk.
            self.users.shift_remove(username);
            return Err(e);
        }

        tracing::info!(user = username, "registered account");
        Ok(())
    }

    /// Check a username/password pair and open a session on success.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the
    /// caller.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let matched = self
            .users
            .get(username)
            .is_some_and(|stored| digest::verify(password, stored));

        if !matched {
            tracing::warn!(user = username, "login rejected");
            return Err(PassvaultError::InvalidCredentials);
        }

        tracing::debug!(user = username, "login accepted");
        Ok(Session::new(username))
    }

    /// Returns `true` if an account with this name exists.
    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Number of registered accounts.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
