//! Request/response transformation seams.
//!
//! Transformers convert canonical conversations and configs into
//! provider-specific wire bodies, and wire responses back into results. The
//! executors are wired against the traits so a different dialect can be
//! dropped in without touching the retry or batching logic.

pub mod request;
pub mod response;

pub use request::{OpenAiRequestTransformer, RequestTransformer};
pub use response::{OpenAiResponseTransformer, ResponseTransformer};
