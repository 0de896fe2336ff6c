//! Observability layer.
//!
//! Every logical chat or embeddings call can be straddled by a pair of
//! structured observations: an input event recorded before delegation, which
//! yields a caller-visible correlation index, and exactly one completion
//! carrying either the success payload or a classified error. Sinks are
//! host-supplied; [`ExecutionLog`] is the in-memory reference sink.
//!
//! Three instantiations exist:
//! - [`ObservedChatModel`] decorates any [`crate::traits::ChatModel`]
//! - [`ObservedEmbeddings`] decorates any [`crate::traits::EmbeddingModel`]
//! - [`LlmRunTracer`] taps an execution engine's own asynchronous
//!   start/end/error hooks instead of wrapping a call directly

pub mod callbacks;
pub mod sink;
pub mod wrappers;

pub use callbacks::LlmRunTracer;
pub use sink::{
    ClassifiedError, ExecutionLog, InvocationEvent, InvocationOutcome, ObservationSink, classify,
};
pub use wrappers::{ObservedChatModel, ObservedEmbeddings};
