//! Transport boundary.
//!
//! The adapter core never performs HTTP itself; it is handed an
//! [`HttpTransport`] capability and is responsible only for what gets sent
//! and how failures are handled. [`ReqwestTransport`] is the production
//! implementation; tests inject scripted transports instead.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::error::LlmError;

/// A single wire request handed to the transport capability
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: reqwest::Method,
    /// Path relative to the transport's base URL, e.g. `/chat/completions`
    pub path: String,
    /// JSON request body
    pub body: Value,
    /// Per-request timeout; `None` means the transport's default applies
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Convenience constructor for a JSON POST
    pub fn post(path: impl Into<String>, body: Value, timeout: Option<Duration>) -> Self {
        Self {
            method: reqwest::Method::POST,
            path: path.into(),
            body,
            timeout,
        }
    }
}

/// Injected "perform request" capability.
///
/// Returns the parsed response body on success. Network failures, non-success
/// statuses, timeouts, and undecodable bodies all surface as [`LlmError`]; the
/// retry loop upstream treats every transport failure as equally retryable.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(&self, req: TransportRequest) -> Result<Value, LlmError>;
}

/// Production transport over a shared `reqwest::Client`.
///
/// Adds a bearer authorization header when an API key is configured. The key
/// is held as a [`SecretString`] so it never shows up in debug output.
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl ReqwestTransport {
    /// Create a transport for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: None,
        }
    }

    /// Set the bearer API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Use a pre-configured HTTP client (connection pool, proxy, TLS)
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(&self, req: TransportRequest) -> Result<Value, LlmError> {
        let url = self.url_for(&req.path);
        let mut builder = self
            .http_client
            .request(req.method.clone(), &url)
            .json(&req.body);
        if let Some(timeout) = req.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        tracing::debug!(method = %req.method, url = %url, "sending request");
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::TimeoutError(e.to_string())
            } else {
                LlmError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                code: status.as_u16(),
                message: text.clone(),
                details: serde_json::from_str(&text).ok(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::HttpError(e.to_string()))?;
        serde_json::from_str(&text)
            .map_err(|e| LlmError::ParseError(format!("Failed to parse response JSON: {e}")))
    }
}
