//! # llm-adapter - OpenAI-Compatible Adapter Core
//!
//! An adapter layer that exposes OpenAI-compatible chat completions and
//! embeddings through a uniform, observable client abstraction. The crate
//! owns request/response translation and resiliency; the actual HTTP call is
//! an injected [`transport::HttpTransport`] capability supplied by the host.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Prompt Normalization**: Heterogeneous caller input (plain text,
//!   message sequences, framework prompt objects) becomes one canonical
//!   conversation via ordered shape recognizers.
//! - **Default Omission**: Generation parameters the caller never set are
//!   left off the wire entirely.
//! - **Bounded Retries**: Every transport failure is retried back to back up
//!   to a configured bound, then propagated unchanged.
//! - **Sequential Batching**: Embedding inputs are chunked and issued in
//!   order, one request per batch, with in-order result assembly.
//! - **Observation Wrappers**: Any client can be decorated to emit paired
//!   input/outcome events to a host sink, including a tracer for execution
//!   engines that report through their own run-id callbacks.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use llm_adapter::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Arc::new(
//!         ReqwestTransport::new("https://api.example.com/v1").with_api_key("key"),
//!     );
//!
//!     let chat = OpenAiChatModel::new(
//!         GenerationConfig::new("gpt-4o-mini").with_temperature(0.7),
//!         transport.clone(),
//!     );
//!     let log = Arc::new(ExecutionLog::new());
//!     let chat = ObservedChatModel::new(chat, log.clone());
//!
//!     let reply = chat.invoke("Hello, world!".into()).await?;
//!     println!("{}", reply.content);
//!
//!     let embeddings = OpenAiEmbeddings::new(EmbeddingConfig::new("e5-large"), transport);
//!     let vectors = embeddings.embed_documents(vec!["doc".into()]).await?;
//!     println!("{} vectors", vectors.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod executors;
pub mod normalize;
pub mod observability;
pub mod traits;
pub mod transformers;
pub mod transport;
pub mod types;

pub use error::LlmError;

/// Common imports for working with the adapter
pub mod prelude {
    pub use crate::error::LlmError;
    pub use crate::executors::{OpenAiChatModel, OpenAiEmbeddings};
    pub use crate::normalize::{PromptInput, normalize};
    pub use crate::observability::{
        ExecutionLog, InvocationOutcome, LlmRunTracer, ObservationSink, ObservedChatModel,
        ObservedEmbeddings,
    };
    pub use crate::traits::{ChatModel, EmbeddingModel};
    pub use crate::transformers::{RequestTransformer, ResponseTransformer};
    pub use crate::transport::{HttpTransport, ReqwestTransport, TransportRequest};
    pub use crate::types::{
        ChatMessage, ChatReply, EmbeddingConfig, GenerationConfig, MessageRole, ResponseFormat,
    };
}
