//! Response transformation.

use serde_json::Value;

use crate::error::LlmError;

/// Extract results from provider wire responses
pub trait ResponseTransformer: Send + Sync {
    /// Text of the first completion choice.
    ///
    /// Missing fields degrade to empty text; a well-formed-but-empty response
    /// is never an error.
    fn chat_text(&self, response: &Value) -> String;

    /// Embedding vectors in the order the provider returned them
    fn embedding_vectors(&self, response: &Value) -> Result<Vec<Vec<f32>>, LlmError>;
}

/// OpenAI-compatible wire dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiResponseTransformer;

impl ResponseTransformer for OpenAiResponseTransformer {
    fn chat_text(&self, response: &Value) -> String {
        response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn embedding_vectors(&self, response: &Value) -> Result<Vec<Vec<f32>>, LlmError> {
        let data = response
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                LlmError::ParseError("embeddings response is missing the data array".to_string())
            })?;
        data.iter()
            .map(|entry| {
                entry
                    .get("embedding")
                    .and_then(Value::as_array)
                    .ok_or_else(|| {
                        LlmError::ParseError(
                            "embeddings response entry is missing an embedding".to_string(),
                        )
                    })?
                    .iter()
                    .map(|n| {
                        n.as_f64().map(|f| f as f32).ok_or_else(|| {
                            LlmError::ParseError("embedding contains a non-numeric value".to_string())
                        })
                    })
                    .collect()
            })
            .collect()
    }
}
