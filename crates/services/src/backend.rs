//! Typed calls for the backend endpoints this client consumes.

use std::sync::Arc;

use alphatest_core::model::{AttemptId, AttemptRecord, Credential, TestId, UserIdentity};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Transport};

/// Identity and credential returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub user: UserIdentity,
    pub credential: Credential,
}

/// Authentication endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` for transport failures and rejected credentials.
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, GatewayError>;

    /// `POST /auth/register`. The account still needs out-of-band verification.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` for transport failures and rejected registrations.
    async fn register(&self, email: &str, password: &str) -> Result<(), GatewayError>;

    /// `GET /auth/me`, validating whatever credential the gateway attaches.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the credential is rejected or the call fails.
    async fn current_user(&self) -> Result<UserIdentity, GatewayError>;
}

/// Attempt history endpoints.
#[async_trait]
pub trait AttemptsApi: Send + Sync {
    /// `GET /user/attempts`, newest first as ordered by the backend.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` for transport failures, rejected credentials and malformed
    /// records.
    async fn list_attempts(&self) -> Result<Vec<AttemptRecord>, GatewayError>;
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: UserIdentity,
    access_token: String,
}

/// Wire shape of an attempt; converted into the validated domain record.
#[derive(Debug, Deserialize)]
struct AttemptPayload {
    id: String,
    test_id: String,
    score: u32,
    total_questions: u32,
    percentage: f64,
    completed_at: String,
}

impl AttemptPayload {
    fn into_record(self) -> Result<AttemptRecord, GatewayError> {
        let completed_at = parse_timestamp(&self.completed_at)?;
        Ok(AttemptRecord::new(
            AttemptId::new(self.id),
            TestId::new(self.test_id),
            self.score,
            self.total_questions,
            self.percentage,
            completed_at,
        )?)
    }
}

/// Accepts RFC 3339 timestamps and offset-less ISO timestamps (read as UTC).
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, GatewayError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|err| GatewayError::Decode(format!("invalid completed_at {raw:?}: {err}")))
}

/// Backend client over any transport (normally `BearerAuth` over `HttpTransport`).
#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn Transport>,
}

impl BackendClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AuthApi for BackendClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, GatewayError> {
        let request = ApiRequest::post_json("/auth/login", &CredentialsBody { email, password })?;
        let response: LoginResponse = self.transport.send(request).await?.json()?;
        Ok(LoginGrant {
            user: response.user,
            credential: Credential::new(response.access_token),
        })
    }

    async fn register(&self, email: &str, password: &str) -> Result<(), GatewayError> {
        let request =
            ApiRequest::post_json("/auth/register", &CredentialsBody { email, password })?;
        self.transport.send(request).await?.error_for_status()?;
        Ok(())
    }

    async fn current_user(&self) -> Result<UserIdentity, GatewayError> {
        self.transport
            .send(ApiRequest::get("/auth/me"))
            .await?
            .json()
    }
}

#[async_trait]
impl AttemptsApi for BackendClient {
    async fn list_attempts(&self) -> Result<Vec<AttemptRecord>, GatewayError> {
        let payloads: Vec<AttemptPayload> = self
            .transport
            .send(ApiRequest::get("/user/attempts"))
            .await?
            .json()?;
        payloads
            .into_iter()
            .map(AttemptPayload::into_record)
            .collect()
    }
}
