//! Record types stored inside `data.json`.
//!
//! Each record holds the Fernet token, the SHA-256 hex digest of the
//! passkey, and a local-time creation stamp.  Field names and the
//! `YYYY-MM-DD HH:MM:SS` timestamp format are fixed by the file format.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Format of the `timestamp` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single encrypted secret as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    /// Fernet token (URL-safe base64).
    #[serde(rename = "encrypted")]
    pub ciphertext: String,

    /// SHA-256 hex digest of the passkey, checked before decrypting.
    #[serde(rename = "passkey")]
    pub passkey_hash: String,

    /// When this entry was (last) stored.
    #[serde(rename = "timestamp", with = "timestamp_format")]
    pub created_at: NaiveDateTime,
}

/// Lightweight view of an entry (no ciphertext, no digest).
///
/// Returned by `VaultStore::list_entries` so callers can show titles
/// and dates without touching anything secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub title: String,
    pub created_at: NaiveDateTime,
}

/// Result of a successful `VaultStore::store`.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub title: String,
    /// The token as written to disk.
    pub ciphertext: String,
    pub created_at: NaiveDateTime,
    /// `true` when an entry with the same title was overwritten.
    pub replaced: bool,
}

/// Current local time truncated to whole seconds, matching what the
/// file can represent.
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
