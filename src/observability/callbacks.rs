//! Run-correlation tracer for engine callback hooks.
//!
//! Some hosts do not call the model through this crate's wrappers but through
//! a third-party execution engine that reports progress via its own
//! start/end/error callbacks, keyed by a run identifier and possibly arriving
//! out of order relative to caller code. [`LlmRunTracer`] bridges those hooks
//! onto an [`ObservationSink`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::Mutex;

use serde_json::{Value, json};

use crate::error::LlmError;
use crate::observability::sink::{InvocationOutcome, ObservationSink, classify};

#[derive(Default)]
struct RunState {
    /// Run identifier -> correlation index, alive between start and completion
    active: HashMap<String, usize>,
    /// Runs already completed, so a late duplicate end/error is a no-op
    completed: HashSet<String>,
}

/// Bridges an execution engine's start/end/error hooks onto a sink.
///
/// The correlation map is owned exclusively by one tracer instance and each
/// entry lives only from start to completion, so memory stays bounded under
/// long-lived hosts. An end or error with no matching start completes a
/// freshly synthesized event with an empty payload instead of being lost.
pub struct LlmRunTracer {
    sink: Arc<dyn ObservationSink>,
    runs: Mutex<RunState>,
}

impl LlmRunTracer {
    /// Create a tracer feeding the given sink
    pub fn new(sink: Arc<dyn ObservationSink>) -> Self {
        Self {
            sink,
            runs: Mutex::new(RunState::default()),
        }
    }

    /// Engine reported the start of a run
    pub fn on_start(&self, run_id: &str, payload: Value) {
        let index = self.sink.record_input(payload);
        let mut runs = self.lock_runs();
        // A reused run identifier starts a new lifecycle.
        runs.completed.remove(run_id);
        if let Some(previous) = runs.active.insert(run_id.to_string(), index) {
            tracing::warn!(run_id, previous, "start for a run that was already active");
        }
    }

    /// Engine reported successful completion of a run
    pub fn on_end(&self, run_id: &str, output: Value) {
        if let Some(index) = self.take(run_id) {
            self.sink.complete(
                index,
                InvocationOutcome::Success {
                    response: json!({ "response": output }),
                },
            );
        }
    }

    /// Engine reported a failed run
    pub fn on_error(&self, run_id: &str, error: &LlmError) {
        if let Some(index) = self.take(run_id) {
            self.sink.complete(
                index,
                InvocationOutcome::Failure {
                    error: classify(error),
                },
            );
        }
    }

    /// Number of runs currently awaiting completion
    pub fn pending_runs(&self) -> usize {
        self.lock_runs().active.len()
    }

    /// Release the run's map entry and hand back its correlation index.
    ///
    /// Returns `None` for a duplicate completion. A completion with no
    /// matching start registers an empty-payload event and returns its index.
    fn take(&self, run_id: &str) -> Option<usize> {
        let mut runs = self.lock_runs();
        if runs.completed.contains(run_id) {
            tracing::warn!(run_id, "ignoring duplicate completion");
            return None;
        }
        runs.completed.insert(run_id.to_string());
        match runs.active.remove(run_id) {
            Some(index) => Some(index),
            None => {
                tracing::warn!(run_id, "completion with no observed start");
                Some(self.sink.record_input(json!({})))
            }
        }
    }

    fn lock_runs(&self) -> std::sync::MutexGuard<'_, RunState> {
        self.runs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::sink::ExecutionLog;

    fn tracer() -> (Arc<ExecutionLog>, LlmRunTracer) {
        let log = Arc::new(ExecutionLog::new());
        let tracer = LlmRunTracer::new(log.clone());
        (log, tracer)
    }

    #[test]
    fn start_end_pairs_by_run_id() {
        let (log, tracer) = tracer();
        tracer.on_start("run-a", json!({"messages": ["a"]}));
        tracer.on_start("run-b", json!({"messages": ["b"]}));
        // Completions arrive out of order.
        tracer.on_end("run-b", json!({"generations": ["B"]}));
        tracer.on_end("run-a", json!({"generations": ["A"]}));

        let events = log.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].input, json!({"messages": ["a"]}));
        assert_eq!(
            events[0].outcome,
            Some(InvocationOutcome::Success {
                response: json!({"response": {"generations": ["A"]}})
            })
        );
        assert!(events[1].outcome.is_some());
        assert_eq!(tracer.pending_runs(), 0);
    }

    #[test]
    fn end_without_start_synthesizes_event() {
        let (log, tracer) = tracer();
        tracer.on_end("ghost", json!({"generations": []}));

        let events = log.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].input, json!({}));
        assert!(events[0].outcome.is_some());
    }

    #[test]
    fn duplicate_completion_is_a_no_op() {
        let (log, tracer) = tracer();
        tracer.on_start("run", json!({}));
        tracer.on_end("run", json!({"generations": []}));
        tracer.on_error("run", &LlmError::HttpError("late".into()));

        let events = log.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].outcome,
            Some(InvocationOutcome::Success { .. })
        ));
    }

    #[test]
    fn error_completion_classifies_for_sink() {
        let (log, tracer) = tracer();
        tracer.on_start("run", json!({}));
        tracer.on_error("run", &LlmError::api_error(500, "boom"));

        let events = log.events();
        match &events[0].outcome {
            Some(InvocationOutcome::Failure { error }) => {
                assert!(error.recognized);
                assert_eq!(error.code, Some(500));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn reused_run_id_starts_fresh_lifecycle() {
        let (log, tracer) = tracer();
        tracer.on_start("run", json!({"try": 1}));
        tracer.on_end("run", json!({}));
        tracer.on_start("run", json!({"try": 2}));
        tracer.on_end("run", json!({}));

        let events = log.events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.outcome.is_some()));
    }
}
