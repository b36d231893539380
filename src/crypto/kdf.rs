//! Passkey-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every secret is encrypted with a key stretched from its passkey.  The
//! salt is a fixed constant shared by all users and all secrets, which
//! keeps the derivation byte-compatible with vaults written by earlier
//! versions.  The consequence is that equal passkeys always produce
//! equal keys: recovering one derived key unlocks every secret that
//! shares the passkey text.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{PassvaultError, Result};

/// Length of the derived key in bytes (256 bits, split by Fernet).
pub const KEY_LEN: usize = 32;

/// Salt applied to every derivation.  Changing it orphans existing data.
pub const FIXED_SALT: &[u8] = b"streamlit-salt";

/// Default PBKDF2 work factor.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// A 32-byte key derived from a passkey.  Zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    /// Access the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// URL-safe base64 form, the encoding a Fernet key is exchanged in.
    pub fn encode(&self) -> Zeroizing<String> {
        Zeroizing::new(URL_SAFE.encode(self.0))
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// PBKDF2 configuration.  The iteration count is the only tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kdf {
    iterations: u32,
}

impl Default for Kdf {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl Kdf {
    /// Build a KDF with a custom iteration count.
    ///
    /// Any count other than the default produces keys that cannot open
    /// entries written with the default.
    pub fn with_iterations(iterations: u32) -> Result<Self> {
        if iterations == 0 {
            return Err(PassvaultError::KeyDerivationFailed(
                "PBKDF2 iterations must be at least 1".into(),
            ));
        }
        Ok(Self { iterations })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive the 32-byte key for `passkey`.
    ///
    /// The same passkey and iteration count always yield the same key.
    pub fn derive(&self, passkey: &str) -> DerivedKey {
        let mut key = [0u8; KEY_LEN];
        pbkdf2::pbkdf2_hmac::<Sha256>(passkey.as_bytes(), FIXED_SALT, self.iterations, &mut key);
        let derived = DerivedKey(key);
        key.zeroize();
        derived
    }
}

/// Derive a key with the default work factor.
pub fn derive(passkey: &str) -> DerivedKey {
    Kdf::default().derive(passkey)
}
