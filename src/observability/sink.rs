//! Observation sinks and event records.

use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

use crate::error::LlmError;

/// Sink-facing diagnostic record built from a failure.
///
/// This record exists for observation only. Errors the host already
/// recognizes (API errors with a provider classification) are forwarded
/// as-is; anything else is wrapped into a host-recognizable shape here. In
/// both cases the caller receives the original [`LlmError`], never this
/// record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassifiedError {
    /// HTTP status code, when the failure carried one
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Raw provider error body, when available
    pub details: Option<Value>,
    /// Whether the failure is transient from the provider's point of view
    pub retryable: bool,
    /// True when the failure already carried a host-recognized
    /// classification; false when this record wraps an unclassified failure
    pub recognized: bool,
}

/// Classify a failure for the observation sink.
///
/// Produces a second, sink-facing value from the failure without consuming
/// or altering it; the caller-facing error stays untouched.
pub fn classify(error: &LlmError) -> ClassifiedError {
    match error {
        LlmError::ApiError {
            code,
            message,
            details,
        } => ClassifiedError {
            code: Some(*code),
            message: message.clone(),
            details: details.clone(),
            retryable: error.is_retryable(),
            recognized: true,
        },
        other => ClassifiedError {
            code: None,
            message: other.to_string(),
            details: None,
            retryable: other.is_retryable(),
            recognized: false,
        },
    }
}

/// Terminal outcome of an invocation
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationOutcome {
    /// The wrapped call returned a result
    Success {
        /// Raw result payload
        response: Value,
    },
    /// The wrapped call failed
    Failure {
        /// Sink-facing classification of the failure
        error: ClassifiedError,
    },
}

/// One observed logical call.
///
/// Created with its input payload when the call starts; completed exactly
/// once when the call ends. An event is never left pending by a wrapper and
/// never completed twice (a second completion is ignored defensively).
#[derive(Debug, Clone, Serialize)]
pub struct InvocationEvent {
    /// Correlation index, unique and monotonic within one sink
    pub index: usize,
    /// Outbound payload recorded at call start
    pub input: Value,
    /// Terminal outcome; `None` while the call is in flight
    pub outcome: Option<InvocationOutcome>,
}

/// Host-supplied observation sink.
///
/// `record_input` assigns and returns the correlation index for a new
/// invocation; `complete` attaches its terminal outcome. Both calls are
/// synchronous so events stay ordered relative to caller code.
pub trait ObservationSink: Send + Sync {
    /// Register a new invocation and return its correlation index
    fn record_input(&self, payload: Value) -> usize;

    /// Complete a previously registered invocation
    fn complete(&self, index: usize, outcome: InvocationOutcome);
}

/// In-memory observation sink.
///
/// Keeps the full event ledger for inspection; doubles as the reference sink
/// in tests and small hosts. Completion of an unknown index or a second
/// completion of the same index is logged and ignored.
#[derive(Default)]
pub struct ExecutionLog {
    events: Mutex<Vec<InvocationEvent>>,
}

impl ExecutionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<InvocationEvent> {
        self.lock_events().clone()
    }

    fn lock_events(&self) -> std::sync::MutexGuard<'_, Vec<InvocationEvent>> {
        // Recover the inner state on poisoning; the ledger stays usable.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ObservationSink for ExecutionLog {
    fn record_input(&self, payload: Value) -> usize {
        let mut events = self.lock_events();
        let index = events.len();
        tracing::debug!(index, "recorded invocation input");
        events.push(InvocationEvent {
            index,
            input: payload,
            outcome: None,
        });
        index
    }

    fn complete(&self, index: usize, outcome: InvocationOutcome) {
        let mut events = self.lock_events();
        match events.get_mut(index) {
            Some(event) if event.outcome.is_none() => {
                tracing::debug!(index, "completed invocation");
                event.outcome = Some(outcome);
            }
            Some(_) => {
                tracing::warn!(index, "ignoring second completion for invocation");
            }
            None => {
                tracing::warn!(index, "completion for unknown invocation");
            }
        }
    }
}
