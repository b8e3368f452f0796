use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::attempt_service::AttemptService;
use crate::backend::{AttemptsApi, AuthApi, BackendClient};
use crate::error::AppServicesError;
use crate::gateway::{BearerAuth, CredentialSource, HttpTransport, Transport};
use crate::session_store::SessionStore;

/// Assembles the session store, the authenticated backend client and the services built
/// on top of them.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionStore>,
    backend: Arc<BackendClient>,
    attempts: Arc<AttemptService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and an HTTP backend at `api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the API base URL is
    /// blank.
    pub async fn new_sqlite(
        db_url: &str,
        api_base_url: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let api_base_url = api_base_url.trim();
        if api_base_url.is_empty() {
            return Err(AppServicesError::BackendUrl(
                "API base URL is empty".to_string(),
            ));
        }

        let storage = Storage::sqlite(db_url).await?;
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(api_base_url));
        tracing::debug!(api_base_url, "backend transport configured");
        Ok(Self::from_parts(&storage, transport, clock))
    }

    /// Wire services over an existing storage and a bottom-level transport.
    ///
    /// The transport is wrapped in `BearerAuth` reading from the session store, so it
    /// must not attach credentials itself.
    #[must_use]
    pub fn from_parts(storage: &Storage, transport: Arc<dyn Transport>, clock: Clock) -> Self {
        let session = Arc::new(SessionStore::new(clock, Arc::clone(&storage.client_state)));
        let credentials: Arc<dyn CredentialSource> = session.clone();
        let authed: Arc<dyn Transport> = Arc::new(BearerAuth::new(transport, credentials));
        let backend = Arc::new(BackendClient::new(authed));
        let attempts_api: Arc<dyn AttemptsApi> = backend.clone();
        let attempts = Arc::new(AttemptService::new(attempts_api, Arc::clone(&session)));

        Self {
            session,
            backend,
            attempts,
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn auth_api(&self) -> Arc<dyn AuthApi> {
        self.backend.clone()
    }

    #[must_use]
    pub fn attempts(&self) -> Arc<AttemptService> {
        Arc::clone(&self.attempts)
    }

    /// Restore the persisted session, validating it against the backend.
    pub async fn restore_session(&self) -> alphatest_core::model::Session {
        self.session.load(self.backend.as_ref()).await
    }
}
