//! Accounts and sessions.
//!
//! - `CredentialStore` registers users and checks passwords (`credentials`)
//! - `Session` is the proof of a successful login (`session`)

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::Session;
