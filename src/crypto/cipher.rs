//! Passkey-keyed encryption of secret text.
//!
//! Glues `kdf` to `fernet`: each call derives the key from the passkey,
//! encodes it the way Fernet expects, and drops it before returning.

use zeroize::Zeroize;

use super::fernet::Fernet;
use super::kdf::Kdf;
use crate::errors::{PassvaultError, Result};

/// Encrypts and decrypts secret text under a passkey.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretCipher {
    kdf: Kdf,
}

impl SecretCipher {
    pub fn new(kdf: Kdf) -> Self {
        Self { kdf }
    }

    pub fn kdf(&self) -> Kdf {
        self.kdf
    }

    /// Encrypt `plaintext` under `passkey` and return the Fernet token.
    pub fn encrypt(&self, plaintext: &str, passkey: &str) -> Result<String> {
        let fernet = self.fernet_for(passkey)?;
        fernet.encrypt(plaintext.as_bytes())
    }

    /// Decrypt a token produced by `encrypt` with the same passkey.
    ///
    /// Wrong passkeys, corrupted tokens and non-UTF-8 payloads all
    /// surface as `DecryptionFailed`.
    pub fn decrypt(&self, token: &str, passkey: &str) -> Result<String> {
        let fernet = self
            .fernet_for(passkey)
            .map_err(|_| PassvaultError::DecryptionFailed)?;

        let plaintext = fernet.decrypt(token).map_err(|e| {
            tracing::debug!("token rejected by cipher");
            e
        })?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PassvaultError::DecryptionFailed
        })
    }

    fn fernet_for(&self, passkey: &str) -> Result<Fernet> {
        let key = self.kdf.derive(passkey);
        Fernet::new(&key.encode())
    }
}
