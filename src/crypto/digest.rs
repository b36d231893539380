//! SHA-256 hex digests used for login passwords and passkey pre-checks.
//!
//! Both `users.json` and `data.json` store the lowercase hex encoding of
//! an unsalted SHA-256 over the UTF-8 bytes.  This is fast by nature and
//! only suitable for the single-user trust boundary the vault runs in;
//! the encryption path goes through PBKDF2 instead (see `kdf`).

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hash `input` with SHA-256 and return the lowercase hex string.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Compare two stored digests in constant time.
///
/// Length mismatch short-circuits to `false`; the length of a hex
/// SHA-256 digest is public anyway.
pub fn digest_matches(expected: &str, actual: &str) -> bool {
    expected.as_bytes().ct_eq(actual.as_bytes()).into()
}

/// Hash `candidate` and check it against a stored hex digest.
pub fn verify(candidate: &str, stored_hex: &str) -> bool {
    digest_matches(stored_hex, &sha256_hex(candidate))
}
