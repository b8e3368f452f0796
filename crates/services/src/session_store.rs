//! Session store: current identity plus bearer credential, with the credential persisted
//! in client-side storage. Every reader and writer receives the store explicitly; there
//! is no ambient session.
//!
//! Mutations are not serialized against an in-flight `load`: a `clear` that lands while
//! `load` awaits `/auth/me` can be overwritten by the late success.

use std::sync::Arc;

use alphatest_core::Clock;
use alphatest_core::model::{Credential, Session, UserIdentity};
use storage::repository::{CREDENTIAL_KEY, ClientStateEntry, ClientStateRepository};
use tokio::sync::watch;

use crate::backend::AuthApi;
use crate::error::SessionStoreError;
use crate::gateway::CredentialSource;

pub struct SessionStore {
    clock: Clock,
    repo: Arc<dyn ClientStateRepository>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ClientStateRepository>) -> Self {
        let (state, _) = watch::channel(Session::anonymous());
        Self { clock, repo, state }
    }

    /// Current session value.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Change notifications; the receiver starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Restore the session from storage at startup.
    ///
    /// With no persisted credential the session stays anonymous and no request is made.
    /// Otherwise the credential is validated through `api.current_user()`; any failure
    /// removes it from storage and leaves the session anonymous. Never fails.
    pub async fn load(&self, api: &dyn AuthApi) -> Session {
        let stored = match self.repo.get_entry(CREDENTIAL_KEY).await {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "could not read stored credential");
                None
            }
        };

        let Some(entry) = stored else {
            self.publish(Session::anonymous());
            return self.snapshot();
        };

        let credential = Credential::new(entry.value);
        self.publish(Session::pending(credential.clone()));

        match api.current_user().await {
            Ok(identity) => {
                tracing::info!(is_admin = identity.is_admin, "restored session");
                self.publish(Session::authenticated(identity, credential));
            }
            Err(err) => {
                tracing::warn!(error = %err, "stored credential rejected; clearing session");
                if let Err(err) = self.clear().await {
                    tracing::warn!(error = %err, "could not remove rejected credential");
                }
            }
        }

        self.snapshot()
    }

    /// Store a freshly issued identity and credential.
    ///
    /// The credential is written before subscribers are notified. The in-memory session is
    /// updated even when persisting fails, so the user stays signed in for this run.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::Storage` if the credential could not be persisted.
    pub async fn set(
        &self,
        identity: UserIdentity,
        credential: Credential,
    ) -> Result<(), SessionStoreError> {
        let entry = ClientStateEntry {
            value: credential.expose().to_string(),
            updated_at: self.clock.now(),
        };
        let persisted = self.repo.put_entry(CREDENTIAL_KEY, &entry).await;
        self.publish(Session::authenticated(identity, credential));
        persisted?;
        Ok(())
    }

    /// Sign out locally: drop the session and the persisted credential.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError::Storage` if the persisted credential could not be removed.
    /// The in-memory session is cleared regardless, after the removal was attempted.
    pub async fn clear(&self) -> Result<(), SessionStoreError> {
        let removed = self.repo.remove_entry(CREDENTIAL_KEY).await;
        self.publish(Session::anonymous());
        removed?;
        Ok(())
    }

    fn publish(&self, session: Session) {
        self.state.send_replace(session);
    }
}

impl CredentialSource for SessionStore {
    fn current_credential(&self) -> Option<Credential> {
        self.state.borrow().credential().cloned()
    }
}
