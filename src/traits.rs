//! Client capability traits.
//!
//! These are the uniform surfaces a host program codes against. Concrete
//! implementations live in `executors`; the observability decorators wrap any
//! implementation without changing its signature.

use async_trait::async_trait;

use crate::error::LlmError;
use crate::normalize::PromptInput;
use crate::types::ChatReply;

/// Chat completion capability
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one chat completion over caller input of any recognized shape
    async fn invoke(&self, input: PromptInput) -> Result<ChatReply, LlmError>;
}

/// Embedding capability
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed a sequence of documents, returning one vector per input in the
    /// same order
    async fn embed_documents(&self, documents: Vec<String>) -> Result<Vec<Vec<f32>>, LlmError>;

    /// Embed a single query document
    async fn embed_query(&self, document: String) -> Result<Vec<f32>, LlmError>;
}
