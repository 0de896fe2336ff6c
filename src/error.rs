//! Error types for the adapter core.
//!
//! Every failure surfaced by this crate is an [`LlmError`]. Transport-level
//! failures (network, HTTP status, timeout) are produced by the transport
//! implementation and propagated unchanged through the retry loop; parse
//! failures come from response decoding. The observability layer builds its
//! own sink-facing diagnostic record from a borrowed `LlmError` (see
//! `observability::classify`) and never replaces the error the caller sees.

use thiserror::Error;

/// Main error type for LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// HTTP/network-level error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// API returned a non-success status
    #[error("API error {code}: {message}")]
    ApiError {
        /// HTTP status code
        code: u16,
        /// Error message from the provider
        message: String,
        /// Raw error body, when it parsed as JSON
        details: Option<serde_json::Value>,
    },

    /// Request exceeded its configured timeout
    #[error("Request timed out: {0}")]
    TimeoutError(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid configuration or parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Internal error that should not normally surface
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl LlmError {
    /// Create an API error from a status code and message
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Whether this error is transient from the provider's point of view.
    ///
    /// The chat retry loop deliberately retries every transport failure up to
    /// its bound; this classification is reported to observation sinks so a
    /// host can distinguish transient failures in its logs.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::TimeoutError(_) => true,
            Self::ApiError { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }

    /// HTTP status code, when the error carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}
