//! Fernet authenticated encryption (AES-128-CBC + HMAC-SHA256).
//!
//! Tokens are interoperable with every other Fernet implementation, so
//! vault files written elsewhere decrypt here and vice versa.
//!
//! Layout of the decoded token:
//!   [ 0x80 | 8-byte BE timestamp | 16-byte IV | ciphertext | 32-byte HMAC ]
//!
//! The HMAC covers everything before it.  The whole token is URL-safe
//! base64 encoded with padding.
//!
//! The crates.io `fernet` crate defaults to an OpenSSL backend; this
//! envelope stays on the same RustCrypto crates as the rest of `crypto`.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{PassvaultError, Result};

type HmacSha256 = Hmac<Sha256>;
type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Format version byte at the start of every token.
const VERSION: u8 = 0x80;

/// AES block size; also the IV length.
const BLOCK_LEN: usize = 16;

/// Version byte + timestamp.
const HEADER_LEN: usize = 1 + 8;

/// HMAC-SHA256 tag length.
const TAG_LEN: usize = 32;

/// A Fernet key: 16 bytes for signing, 16 bytes for encryption.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Fernet {
    signing_key: [u8; 16],
    encryption_key: [u8; 16],
}

impl Fernet {
    /// Build a cipher from a URL-safe base64 encoded 32-byte key.
    pub fn new(encoded_key: &str) -> Result<Self> {
        let mut raw = URL_SAFE.decode(encoded_key).map_err(|_| {
            PassvaultError::KeyDerivationFailed("Fernet key is not valid base64".into())
        })?;
        if raw.len() != 32 {
            raw.zeroize();
            return Err(PassvaultError::KeyDerivationFailed(
                "Fernet key must be 32 bytes".into(),
            ));
        }

        let mut signing_key = [0u8; 16];
        let mut encryption_key = [0u8; 16];
        signing_key.copy_from_slice(&raw[..16]);
        encryption_key.copy_from_slice(&raw[16..]);
        raw.zeroize();

        Ok(Self {
            signing_key,
            encryption_key,
        })
    }

    /// Encrypt `data` with a fresh random IV, stamped with the current time.
    pub fn encrypt(&self, data: &[u8]) -> Result<String> {
        let mut iv = [0u8; BLOCK_LEN];
        rand::rng().fill_bytes(&mut iv);
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0);
        self.encrypt_at(data, now, iv)
    }

    /// Encrypt with an explicit timestamp and IV.
    ///
    /// Never reuse an IV under the same key; this exists so the wire
    /// format can be pinned against known tokens.
    pub fn encrypt_at(&self, data: &[u8], timestamp: u64, iv: [u8; BLOCK_LEN]) -> Result<String> {
        let ciphertext = Aes128CbcEnc::new_from_slices(&self.encryption_key, &iv)
            .map_err(|e| PassvaultError::EncryptionFailed(format!("invalid key length: {e}")))?
            .encrypt_padded_vec_mut::<Pkcs7>(data);

        let mut token = Vec::with_capacity(HEADER_LEN + BLOCK_LEN + ciphertext.len() + TAG_LEN);
        token.push(VERSION);
        token.extend_from_slice(&timestamp.to_be_bytes());
        token.extend_from_slice(&iv);
        token.extend_from_slice(&ciphertext);

        let tag = self.sign(&token)?;
        token.extend_from_slice(&tag);

        Ok(URL_SAFE.encode(token))
    }

    /// Verify and decrypt a token.
    ///
    /// Every failure (bad encoding, truncation, wrong key, tampering,
    /// bad padding) is reported as `DecryptionFailed`.
    pub fn decrypt(&self, token: &str) -> Result<Vec<u8>> {
        let raw = self.verify(token)?;

        let iv = &raw[HEADER_LEN..HEADER_LEN + BLOCK_LEN];
        let ciphertext = &raw[HEADER_LEN + BLOCK_LEN..raw.len() - TAG_LEN];
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(PassvaultError::DecryptionFailed);
        }

        Aes128CbcDec::new_from_slices(&self.encryption_key, iv)
            .map_err(|_| PassvaultError::DecryptionFailed)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| PassvaultError::DecryptionFailed)
    }

    /// Return the creation timestamp (Unix seconds) of an authentic token.
    pub fn issued_at(&self, token: &str) -> Result<u64> {
        let raw = self.verify(token)?;
        let mut ts = [0u8; 8];
        ts.copy_from_slice(&raw[1..HEADER_LEN]);
        Ok(u64::from_be_bytes(ts))
    }

    /// Decode the token, check the version byte and the HMAC.
    fn verify(&self, token: &str) -> Result<Vec<u8>> {
        let raw = URL_SAFE
            .decode(token.trim())
            .map_err(|_| PassvaultError::DecryptionFailed)?;

        if raw.len() < HEADER_LEN + BLOCK_LEN + TAG_LEN || raw[0] != VERSION {
            return Err(PassvaultError::DecryptionFailed);
        }

        let (signed, tag) = raw.split_at(raw.len() - TAG_LEN);
        let mut mac = HmacSha256::new_from_slice(&self.signing_key)
            .map_err(|_| PassvaultError::DecryptionFailed)?;
        mac.update(signed);
        mac.verify_slice(tag)
            .map_err(|_| PassvaultError::DecryptionFailed)?;

        Ok(raw)
    }

    fn sign(&self, data: &[u8]) -> Result<[u8; TAG_LEN]> {
        let mut mac = HmacSha256::new_from_slice(&self.signing_key)
            .map_err(|e| PassvaultError::EncryptionFailed(format!("HMAC init: {e}")))?;
        mac.update(data);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&mac.finalize().into_bytes());
        Ok(tag)
    }
}
