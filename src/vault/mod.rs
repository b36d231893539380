//! Vault module — per-user, per-title encrypted secret storage.
//!
//! This module provides:
//! - `SecretRecord`, `EntryMetadata` and `Receipt` types (`secret`)
//! - High-level `VaultStore` for storing, retrieving and listing (`store`)

pub mod secret;
pub mod store;

// Re-export the most commonly used items.
pub use secret::{EntryMetadata, Receipt, SecretRecord};
pub use store::VaultStore;
