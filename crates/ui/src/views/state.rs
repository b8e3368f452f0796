use dioxus::prelude::*;
use services::AttemptServiceError;

use crate::views::Notices;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    LoadFailed,
    SessionExpired,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::LoadFailed => "Could not load attempts.",
            ViewError::SessionExpired => "Your session has expired. Please sign in again.",
        }
    }

    /// Only plain load failures are worth retrying; an expired session redirects instead.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, ViewError::LoadFailed)
    }
}

impl From<AttemptServiceError> for ViewError {
    fn from(err: AttemptServiceError) -> Self {
        match err {
            AttemptServiceError::SessionExpired => ViewError::SessionExpired,
            _ => ViewError::LoadFailed,
        }
    }
}

/// Map a failed load for display; retryable failures also raise an error notice.
pub fn report_load_failure(notices: Notices, err: AttemptServiceError) -> ViewError {
    let err = ViewError::from(err);
    if err.is_retryable() {
        notices.error(err.message());
    }
    err
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::LoadFailed),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Inline error with a Retry button when the error allows one.
#[component]
pub fn LoadError(error: ViewError, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "load-error",
            p { "{error.message()}" }
            if error.is_retryable() {
                button { class: "btn", onclick: move |_| on_retry.call(()), "Retry" }
            }
        }
    }
}
