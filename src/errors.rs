use thiserror::Error;

/// All errors that can occur in Passvault.
#[derive(Debug, Error)]
pub enum PassvaultError {
    // --- Account errors ---
    #[error("Username '{0}' already exists")]
    DuplicateUser(String),

    #[error("Incorrect username or password")]
    InvalidCredentials,

    // --- Vault errors ---
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("No entry titled '{0}'")]
    NoSuchEntry(String),

    #[error("Incorrect passkey")]
    IncorrectPasskey,

    // --- Crypto errors ---
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for Passvault results.
pub type Result<T> = std::result::Result<T, PassvaultError>;
