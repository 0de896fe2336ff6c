//! Concrete client implementations over the transport capability.

pub mod chat;
pub mod embedding;

pub use chat::OpenAiChatModel;
pub use embedding::OpenAiEmbeddings;

/// Chat completions endpoint path
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
/// Embeddings endpoint path
pub const EMBEDDINGS_PATH: &str = "/embeddings";
