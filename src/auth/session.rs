/// An authenticated identity.
///
/// Only `CredentialStore::authenticate` hands these out, so holding a
/// `Session` is proof the password was checked in this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub(crate) fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
