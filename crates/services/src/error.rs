//! Shared error types for the services crate.

use thiserror::Error;

use alphatest_core::model::AttemptError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Message shown when a failure carries nothing more specific.
pub const GENERIC_FAILURE_MESSAGE: &str = "The operation could not be completed.";

/// Errors surfaced by the request gateway and backend client.
///
/// Failures pass through unchanged: there is no retry and no translation beyond
/// extracting the backend's `detail` message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("unable to reach the server: {0}")]
    Network(String),
    #[error("request failed ({status})")]
    Http { status: u16, detail: Option<String> },
    #[error("response error: {0}")]
    Decode(String),
    #[error("request error: {0}")]
    Encode(String),
}

impl GatewayError {
    /// The backend refused the credential (missing, expired or revoked).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Http { status: 401, .. })
    }

    /// A single human-readable message: the backend's `detail` when present, otherwise a
    /// generic fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<AttemptError> for GatewayError {
    fn from(err: AttemptError) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Errors emitted by `SessionStore` mutations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AttemptService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptServiceError {
    #[error("session expired")]
    SessionExpired,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error("invalid backend url: {0}")]
    BackendUrl(String),
}
