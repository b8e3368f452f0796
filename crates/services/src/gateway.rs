//! Outbound request pipeline.
//!
//! Requests are plain values ([`ApiRequest`]) handed to a [`Transport`]. Credential
//! injection is a visible stage ([`BearerAuth`]) wrapping another transport, so tests can
//! swap the bottom of the stack for a fake without touching any global state.

use std::sync::Arc;

use alphatest_core::model::Credential;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::GatewayError;

/// Maximum number of characters of a backend `detail` surfaced to the UI.
const MAX_DETAIL_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Build a POST carrying `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Encode` if `body` cannot be serialized.
    pub fn post_json<B: Serialize>(
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, GatewayError> {
        let body = serde_json::to_value(body)
            .map_err(|err| GatewayError::Encode(format!("Failed to encode request: {err}")))?;
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            headers: Vec::new(),
            body: Some(body),
        })
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header value with a case-insensitive name match.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response: status plus body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a successful JSON body, or turn a non-2xx response into `GatewayError::Http`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Http` for non-2xx statuses and `GatewayError::Decode` when the
    /// body does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, GatewayError> {
        let response = self.error_for_status()?;
        serde_json::from_slice(&response.body)
            .map_err(|err| GatewayError::Decode(format!("Failed to decode response: {err}")))
    }

    /// Pass 2xx responses through; map anything else to `GatewayError::Http`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Http` carrying the payload's `detail` when present.
    pub fn error_for_status(self) -> Result<Self, GatewayError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(GatewayError::Http {
                status: self.status,
                detail: extract_detail(&self.body),
            })
        }
    }
}

/// Pull a user-facing message out of an error payload.
///
/// Accepts `{"detail": "..."}` and validation lists `{"detail": [{"msg": "..."}]}`.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let message = match value.get("detail")? {
        Value::String(text) => text.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))?
            .trim()
            .to_string(),
        _ => return None,
    };

    if message.is_empty() {
        None
    } else {
        Some(message.chars().take(MAX_DETAIL_CHARS).collect())
    }
}

/// Sends requests somewhere and returns whatever came back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns `GatewayError::Network` when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError>;
}

/// Supplies the bearer credential for outgoing requests, if any.
pub trait CredentialSource: Send + Sync {
    fn current_credential(&self) -> Option<Credential>;
}

/// `reqwest`-backed transport rooted at the API base URL.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        let url = build_url(&self.base_url, &request.path);
        tracing::debug!(method = ?request.method, %url, "sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Network(err.to_string()))?;

        tracing::debug!(status, %url, "response received");
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

/// Decorator that attaches `Authorization: Bearer <credential>` when a credential exists.
///
/// Requests without a credential are forwarded untouched. Responses and failures are
/// returned exactly as the inner transport produced them.
#[derive(Clone)]
pub struct BearerAuth {
    inner: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialSource>,
}

impl BearerAuth {
    #[must_use]
    pub fn new(inner: Arc<dyn Transport>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self { inner, credentials }
    }
}

#[async_trait]
impl Transport for BearerAuth {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, GatewayError> {
        let request = match self.credentials.current_credential() {
            Some(credential) => request.with_header(
                "Authorization",
                format!("Bearer {}", credential.expose()),
            ),
            None => request,
        };
        self.inner.send(request).await
    }
}

/// Join the base URL and a request path with exactly one slash.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
