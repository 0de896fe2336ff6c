//! Observation decorators for chat and embedding clients.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::LlmError;
use crate::normalize::PromptInput;
use crate::observability::sink::{InvocationOutcome, ObservationSink, classify};
use crate::traits::{ChatModel, EmbeddingModel};
use crate::types::ChatReply;

/// Decorates a [`ChatModel`] with input/output/error observation.
///
/// The wrapper registers an input event before delegating and completes it
/// exactly once afterwards. On failure the sink receives a classified record
/// while the caller receives the original error unchanged; the wrapper never
/// alters the wrapped model's results.
pub struct ObservedChatModel<M> {
    inner: M,
    sink: Arc<dyn ObservationSink>,
}

impl<M> ObservedChatModel<M> {
    /// Wrap a chat model with the given sink
    pub fn new(inner: M, sink: Arc<dyn ObservationSink>) -> Self {
        Self { inner, sink }
    }
}

fn chat_input_payload(input: &PromptInput) -> Value {
    let messages = match input {
        PromptInput::Text(text) => json!([text]),
        PromptInput::Messages(messages) => {
            serde_json::to_value(messages).unwrap_or_else(|_| Value::Null)
        }
        PromptInput::Value(value) => json!([value]),
    };
    json!({ "messages": messages })
}

#[async_trait]
impl<M: ChatModel> ChatModel for ObservedChatModel<M> {
    async fn invoke(&self, input: PromptInput) -> Result<ChatReply, LlmError> {
        let index = self.sink.record_input(chat_input_payload(&input));
        match self.inner.invoke(input).await {
            Ok(reply) => {
                self.sink.complete(
                    index,
                    InvocationOutcome::Success {
                        response: json!({ "response": { "content": reply.content } }),
                    },
                );
                Ok(reply)
            }
            Err(error) => {
                self.sink.complete(
                    index,
                    InvocationOutcome::Failure {
                        error: classify(&error),
                    },
                );
                Err(error)
            }
        }
    }
}

/// Decorates an [`EmbeddingModel`] with input/output/error observation.
///
/// Both entry points record one event per logical call: `embed_documents`
/// observes the full document list regardless of how many wire batches the
/// inner client issues, and `embed_query` observes a single-element list.
pub struct ObservedEmbeddings<E> {
    inner: E,
    sink: Arc<dyn ObservationSink>,
}

impl<E> ObservedEmbeddings<E> {
    /// Wrap an embeddings client with the given sink
    pub fn new(inner: E, sink: Arc<dyn ObservationSink>) -> Self {
        Self { inner, sink }
    }

    fn complete_failure(&self, index: usize, error: &LlmError) {
        self.sink.complete(
            index,
            InvocationOutcome::Failure {
                error: classify(error),
            },
        );
    }
}

#[async_trait]
impl<E: EmbeddingModel> EmbeddingModel for ObservedEmbeddings<E> {
    async fn embed_documents(&self, documents: Vec<String>) -> Result<Vec<Vec<f32>>, LlmError> {
        let index = self.sink.record_input(json!({ "inputs": documents }));
        match self.inner.embed_documents(documents).await {
            Ok(embeddings) => {
                self.sink.complete(
                    index,
                    InvocationOutcome::Success {
                        response: json!({ "response": { "embeddings": embeddings } }),
                    },
                );
                Ok(embeddings)
            }
            Err(error) => {
                self.complete_failure(index, &error);
                Err(error)
            }
        }
    }

    async fn embed_query(&self, document: String) -> Result<Vec<f32>, LlmError> {
        let index = self.sink.record_input(json!({ "inputs": [document] }));
        match self.inner.embed_query(document).await {
            Ok(embedding) => {
                self.sink.complete(
                    index,
                    InvocationOutcome::Success {
                        response: json!({ "response": { "embeddings": embedding } }),
                    },
                );
                Ok(embedding)
            }
            Err(error) => {
                self.complete_failure(index, &error);
                Err(error)
            }
        }
    }
}
