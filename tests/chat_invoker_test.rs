//! Retry and extraction behavior of the chat executor.

mod support;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use llm_adapter::prelude::*;
use support::{MockTransport, chat_response};

fn model(transport: Arc<MockTransport>, max_retries: u32) -> OpenAiChatModel {
    OpenAiChatModel::new(
        GenerationConfig::new("mock-model").with_max_retries(max_retries),
        transport,
    )
}

#[tokio::test]
async fn succeeds_after_transient_failures() {
    // Fails exactly twice, then succeeds: with max_retries = 2 the call
    // recovers on the third attempt.
    let transport = Arc::new(MockTransport::new(vec![
        Err(LlmError::HttpError("connection reset".into())),
        Err(LlmError::api_error(503, "unavailable")),
        Ok(chat_response("recovered")),
    ]));
    let reply = model(transport.clone(), 2)
        .invoke("hello".into())
        .await
        .unwrap();

    assert_eq!(reply.content, "recovered");
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn exhausted_retries_propagate_the_last_failure_unchanged() {
    let transport = Arc::new(MockTransport::new(vec![
        Err(LlmError::api_error(500, "first")),
        Err(LlmError::api_error(500, "second")),
        Err(LlmError::api_error(500, "third")),
        Ok(chat_response("never reached")),
    ]));
    let error = model(transport.clone(), 2)
        .invoke("hello".into())
        .await
        .unwrap_err();

    // 1 initial attempt + 2 retries, and the surviving error is the final
    // transport failure, not a wrapper.
    assert_eq!(transport.request_count(), 3);
    match error {
        LlmError::ApiError { code, message, .. } => {
            assert_eq!(code, 500);
            assert_eq!(message, "third");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn zero_retries_fail_on_first_attempt() {
    let transport = Arc::new(MockTransport::new(vec![Err(LlmError::TimeoutError(
        "expired".into(),
    ))]));
    let error = model(transport.clone(), 0)
        .invoke("hello".into())
        .await
        .unwrap_err();

    assert_eq!(transport.request_count(), 1);
    assert!(matches!(error, LlmError::TimeoutError(_)));
}

#[tokio::test]
async fn identical_request_is_reissued_on_retry() {
    let transport = Arc::new(MockTransport::new(vec![
        Err(LlmError::HttpError("reset".into())),
        Ok(chat_response("ok")),
    ]));
    model(transport.clone(), 1).invoke("same".into()).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "/chat/completions");
    assert_eq!(requests[0].body, requests[1].body);
    assert_eq!(
        requests[0].body,
        json!({
            "model": "mock-model",
            "messages": [{ "role": "user", "content": "same" }]
        })
    );
}

#[tokio::test]
async fn timeout_is_forwarded_to_the_transport() {
    let transport = Arc::new(MockTransport::new(vec![Ok(chat_response("ok"))]));
    let config = GenerationConfig::new("mock-model")
        .with_max_retries(0)
        .with_timeout(Duration::from_secs(30));
    OpenAiChatModel::new(config, transport.clone())
        .invoke("hi".into())
        .await
        .unwrap();

    assert_eq!(transport.requests()[0].timeout, Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn empty_choices_degrade_to_empty_reply() {
    let transport = Arc::new(MockTransport::new(vec![Ok(json!({"choices": []}))]));
    let reply = model(transport, 0).invoke("hi".into()).await.unwrap();
    assert_eq!(reply.content, "");
}

#[tokio::test]
async fn conversation_input_is_submitted_verbatim() {
    let transport = Arc::new(MockTransport::new(vec![Ok(chat_response("ok"))]));
    let conversation = vec![
        ChatMessage::system("be terse"),
        ChatMessage::user("question"),
        ChatMessage::assistant("draft"),
    ];
    model(transport.clone(), 0)
        .invoke(conversation.clone().into())
        .await
        .unwrap();

    let body = &transport.requests()[0].body;
    let wire: Vec<ChatMessage> = serde_json::from_value(body["messages"].clone()).unwrap();
    assert_eq!(wire, conversation);
}
