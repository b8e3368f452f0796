use crate::model::{Credential, UserIdentity};

/// Who is signed in, as far as this client knows.
///
/// Three shapes are reachable through the constructors:
/// - anonymous: no credential, no identity
/// - pending: a persisted credential awaiting validation, no identity yet
/// - authenticated: credential accepted by the backend, identity present
///
/// An identity never exists without a credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<UserIdentity>,
    credential: Option<Credential>,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(credential: Credential) -> Self {
        Self {
            identity: None,
            credential: Some(credential),
        }
    }

    #[must_use]
    pub fn authenticated(identity: UserIdentity, credential: Credential) -> Self {
        Self {
            identity: Some(identity),
            credential: Some(credential),
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|identity| identity.is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_session_is_not_authenticated() {
        let session = Session::pending(Credential::new("t"));
        assert!(!session.is_authenticated());
        assert!(session.credential().is_some());
    }

    #[test]
    fn admin_flag_follows_identity() {
        let session =
            Session::authenticated(UserIdentity::new("a@b.es", true), Credential::new("t"));
        assert!(session.is_admin());
        assert!(!Session::anonymous().is_admin());
    }
}
