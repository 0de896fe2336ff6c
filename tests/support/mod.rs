//! Shared test support: a scripted transport capability.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use llm_adapter::prelude::*;

/// Transport that replays a scripted sequence of results and records every
/// request it receives.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, LlmError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<Value, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All requests issued so far, in order
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn request(&self, req: TransportRequest) -> Result<Value, LlmError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InternalError("mock transport exhausted".into())))
    }
}

/// Wire-shaped chat completion response with the given content
pub fn chat_response(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "mock-model",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Wire-shaped embeddings response with one vector per input
pub fn embeddings_response(vectors: &[Vec<f32>]) -> Value {
    json!({
        "object": "list",
        "data": vectors
            .iter()
            .enumerate()
            .map(|(i, v)| json!({ "object": "embedding", "index": i, "embedding": v }))
            .collect::<Vec<_>>()
    })
}
