//! Cryptographic primitives for Passvault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 passkey stretching with a fixed salt (`kdf`)
//! - Fernet authenticated encryption (`fernet`)
//! - The passkey-keyed `SecretCipher` built on both (`cipher`)
//! - SHA-256 hex digests for passwords and passkey checks (`digest`)

pub mod cipher;
pub mod digest;
pub mod fernet;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{SecretCipher, Kdf, sha256_hex, ...};
pub use cipher::SecretCipher;
pub use digest::sha256_hex;
pub use fernet::Fernet;
pub use kdf::{derive, DerivedKey, Kdf};
