//! Request transformation.
//!
//! Converts a canonical conversation plus generation parameters into a
//! provider wire body, applying default-omission rules: optional parameters
//! the caller never set are left out of the body entirely rather than sent as
//! null or a provider default.

use serde_json::{Map, Value, json};

use crate::error::LlmError;
use crate::types::{ChatMessage, EmbeddingConfig, GenerationConfig, ResponseFormat};

/// Transform canonical requests into provider-specific JSON bodies
pub trait RequestTransformer: Send + Sync {
    /// Build a chat-completions request body
    fn transform_chat(
        &self,
        messages: &[ChatMessage],
        config: &GenerationConfig,
    ) -> Result<Value, LlmError>;

    /// Build an embeddings request body for one batch of inputs
    fn transform_embedding(
        &self,
        inputs: &[String],
        config: &EmbeddingConfig,
    ) -> Result<Value, LlmError>;
}

/// OpenAI-compatible wire dialect.
///
/// No range validation happens here; the transformer trusts its input and
/// leaves constraint enforcement to the presentation layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiRequestTransformer;

impl RequestTransformer for OpenAiRequestTransformer {
    fn transform_chat(
        &self,
        messages: &[ChatMessage],
        config: &GenerationConfig,
    ) -> Result<Value, LlmError> {
        let mut body = Map::new();
        body.insert("model".to_string(), json!(config.model));
        body.insert(
            "messages".to_string(),
            serde_json::to_value(messages).map_err(|e| LlmError::ParseError(e.to_string()))?,
        );

        if let Some(temperature) = config.temperature {
            body.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(top_p) = config.top_p {
            body.insert("top_p".to_string(), json!(top_p));
        }
        if let Some(penalty) = config.presence_penalty {
            body.insert("presence_penalty".to_string(), json!(penalty));
        }
        if let Some(penalty) = config.frequency_penalty {
            body.insert("frequency_penalty".to_string(), json!(penalty));
        }
        // max_tokens goes on the wire only when present and non-negative.
        if let Some(max_tokens) = config.max_tokens
            && max_tokens >= 0
        {
            body.insert("max_tokens".to_string(), json!(max_tokens));
        }
        // The free-text default is never sent explicitly.
        if config.response_format == ResponseFormat::JsonObject {
            body.insert("response_format".to_string(), json!({"type": "json_object"}));
        }

        Ok(Value::Object(body))
    }

    fn transform_embedding(
        &self,
        inputs: &[String],
        config: &EmbeddingConfig,
    ) -> Result<Value, LlmError> {
        Ok(json!({
            "model": config.model,
            "input": inputs,
        }))
    }
}
