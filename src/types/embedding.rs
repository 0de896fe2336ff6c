//! Embedding parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default number of documents submitted per embeddings request
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Parameters for embedding requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model identifier
    pub model: String,
    /// Maximum number of documents per request (floor of 1 is enforced at use)
    pub batch_size: usize,
    /// Replace newlines in inputs with single spaces before submission
    pub strip_new_lines: bool,
    /// Per-request timeout, enforced by the transport
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl EmbeddingConfig {
    /// Create a config for the given model with default batching
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            batch_size: DEFAULT_BATCH_SIZE,
            strip_new_lines: true,
            timeout: None,
        }
    }

    /// Set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Enable or disable newline stripping
    pub fn with_strip_new_lines(mut self, strip: bool) -> Self {
        self.strip_new_lines = strip;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Batch size with the minimum floor applied
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
