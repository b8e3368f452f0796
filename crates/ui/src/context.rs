use std::sync::Arc;

use alphatest_core::model::Session;
use dioxus::prelude::*;
use services::{AppServices, AttemptService, AuthApi, SessionStore};

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionStore>;
    fn auth_api(&self) -> Arc<dyn AuthApi>;
    fn attempts(&self) -> Arc<AttemptService>;
}

impl UiApp for AppServices {
    fn session(&self) -> Arc<SessionStore> {
        AppServices::session(self)
    }

    fn auth_api(&self) -> Arc<dyn AuthApi> {
        AppServices::auth_api(self)
    }

    fn attempts(&self) -> Arc<AttemptService> {
        AppServices::attempts(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionStore>,
    auth_api: Arc<dyn AuthApi>,
    attempts: Arc<AttemptService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            auth_api: app.auth_api(),
            attempts: app.attempts(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn auth_api(&self) -> Arc<dyn AuthApi> {
        Arc::clone(&self.auth_api)
    }

    #[must_use]
    pub fn attempts(&self) -> Arc<AttemptService> {
        Arc::clone(&self.attempts)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Reactive mirror of the session store, provided by `App`.
///
/// `ready` flips once the startup credential check has finished.
#[derive(Clone, Copy, PartialEq)]
pub struct AuthState {
    pub session: Signal<Session>,
    pub ready: Signal<bool>,
}
