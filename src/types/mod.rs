//! Core types shared across the adapter.

mod chat;
mod embedding;

pub use chat::{ChatMessage, ChatReply, GenerationConfig, MessageRole, ResponseFormat};
pub use embedding::EmbeddingConfig;
