use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimal profile returned by the backend for the signed-in user.
///
/// Treated as an immutable snapshot; the client never edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserIdentity {
    #[must_use]
    pub fn new(email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            email: email.into(),
            is_admin,
        }
    }
}

/// Opaque bearer token issued by the backend at login.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for the `Authorization` header and persistence only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
