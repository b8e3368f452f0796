#![forbid(unsafe_code)]

pub mod app_services;
pub mod attempt_service;
pub mod auth_form;
pub mod backend;
pub mod error;
pub mod gateway;
pub mod session_store;

pub use alphatest_core::Clock;

pub use app_services::AppServices;
pub use attempt_service::{AttemptService, TestOverview, TestResults};
pub use auth_form::{
    AuthForm, AuthFormController, AuthMode, FormError, Submission, SubmitOutcome, execute,
};
pub use backend::{AttemptsApi, AuthApi, BackendClient, LoginGrant};
pub use error::{
    AppServicesError, AttemptServiceError, GENERIC_FAILURE_MESSAGE, GatewayError,
    SessionStoreError,
};
pub use gateway::{
    ApiRequest, ApiResponse, BearerAuth, CredentialSource, HttpTransport, Method, Transport,
};
pub use session_store::SessionStore;
