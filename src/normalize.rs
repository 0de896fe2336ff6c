//! Prompt normalization.
//!
//! Callers hand chat models anything from a plain string to a
//! framework-specific prompt object. This module converts every recognized
//! shape into a canonical ordered `Vec<ChatMessage>`. Shapes are tried in a
//! fixed order by a list of recognizers, each returning an optional
//! conversation; the first match wins and a serialization fallback always
//! succeeds, so normalization never fails.

use serde_json::Value;

use crate::types::{ChatMessage, MessageRole};

/// Caller-supplied prompt input of heterogeneous shape
#[derive(Debug, Clone)]
pub enum PromptInput {
    /// Plain text, becomes a single user message
    Text(String),
    /// Already an ordered conversation, passed through unchanged
    Messages(Vec<ChatMessage>),
    /// A structured prompt object from some framework
    Value(Value),
}

impl From<&str> for PromptInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PromptInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<ChatMessage>> for PromptInput {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self::Messages(messages)
    }
}

impl From<Value> for PromptInput {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Convert caller input of unknown shape into a conversation.
///
/// The result is never empty: when every recognized message is content-less,
/// a single user message with empty content is substituted. That fallback is
/// documented behavior, not an error.
pub fn normalize(input: &PromptInput) -> Vec<ChatMessage> {
    let messages = match input {
        PromptInput::Text(text) => vec![ChatMessage::user(text.clone())],
        PromptInput::Messages(messages) => messages.clone(),
        PromptInput::Value(value) => normalize_value(value),
    };
    if messages.is_empty() {
        vec![ChatMessage::user("")]
    } else {
        messages
    }
}

type Recognizer = fn(&Value) -> Option<Vec<ChatMessage>>;

/// Shape recognizers in priority order; first match wins.
const RECOGNIZERS: &[Recognizer] = &[
    as_plain_text,
    as_message_array,
    as_input_field,
    as_messages_field,
    as_single_prompt,
    as_prompt_parts,
];

fn normalize_value(value: &Value) -> Vec<ChatMessage> {
    for recognize in RECOGNIZERS {
        if let Some(messages) = recognize(value) {
            return drop_empty(messages);
        }
    }
    // Fallback: serialize the whole object and wrap as a user message.
    vec![ChatMessage::user(value.to_string())]
}

/// Content-less coerced messages are dropped before assembly.
fn drop_empty(messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    messages
        .into_iter()
        .filter(|m| !m.content.is_empty())
        .collect()
}

/// A JSON string is treated like plain text input.
fn as_plain_text(value: &Value) -> Option<Vec<ChatMessage>> {
    value
        .as_str()
        .map(|text| vec![ChatMessage::user(text.to_string())])
}

/// An array of `{role, content}` pairs passes through unchanged.
fn as_message_array(value: &Value) -> Option<Vec<ChatMessage>> {
    coerce_sequence(value.as_array()?)
}

/// `{"input": "text"}` becomes a single user message.
fn as_input_field(value: &Value) -> Option<Vec<ChatMessage>> {
    let text = value.get("input")?.as_str()?;
    Some(vec![ChatMessage::user(text.to_string())])
}

/// `{"messages": [...]}` passes through, coercing third-party role names.
fn as_messages_field(value: &Value) -> Option<Vec<ChatMessage>> {
    coerce_sequence(value.get("messages")?.as_array()?)
}

/// A sequence matches when every element is message-shaped. Entries whose
/// content is missing are dropped here; empty content is dropped later with
/// the rest of the content-less messages.
fn coerce_sequence(items: &[Value]) -> Option<Vec<ChatMessage>> {
    if !items.iter().all(looks_like_message) {
        return None;
    }
    Some(items.iter().filter_map(coerce_message).collect())
}

fn looks_like_message(item: &Value) -> bool {
    item.is_object()
        && ["role", "type", "content", "text"]
            .iter()
            .any(|key| item.get(key).is_some())
}

/// `{"prompt": "text"}` or `{"prompt": {"value": "text"}}`.
fn as_single_prompt(value: &Value) -> Option<Vec<ChatMessage>> {
    let prompt = value.get("prompt")?;
    let text = prompt
        .as_str()
        .or_else(|| prompt.get("value").and_then(Value::as_str))?;
    Some(vec![ChatMessage::user(text.to_string())])
}

/// `{"prompt": {"parts": [{"text": ...}, ...]}}` or `{"parts": [...]}`:
/// content is the newline-joined concatenation of non-empty text fragments,
/// role defaulted to user unless a role hint is present.
fn as_prompt_parts(value: &Value) -> Option<Vec<ChatMessage>> {
    let container = value.get("prompt").unwrap_or(value);
    let parts = container.get("parts")?.as_array()?;
    let content = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let role = container
        .get("role")
        .and_then(Value::as_str)
        .map_or(MessageRole::User, coerce_role);
    Some(vec![ChatMessage::new(role, content)])
}

/// Coerce one element of a message sequence; requires a textual content
/// field under `content` or `text`. Role may appear under `role` or `type`.
fn coerce_message(item: &Value) -> Option<ChatMessage> {
    let content = item
        .get("content")
        .or_else(|| item.get("text"))?
        .as_str()?;
    let role = item
        .get("role")
        .or_else(|| item.get("type"))
        .and_then(Value::as_str)
        .map_or(MessageRole::User, coerce_role);
    Some(ChatMessage::new(role, content.to_string()))
}

/// Map third-party role taxonomies onto ours; unrecognized roles become user.
fn coerce_role(role: &str) -> MessageRole {
    match role {
        "system" => MessageRole::System,
        "user" | "human" => MessageRole::User,
        "assistant" | "ai" => MessageRole::Assistant,
        "tool" => MessageRole::Tool,
        "function" => MessageRole::Function,
        _ => MessageRole::User,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_becomes_user_message() {
        let messages = normalize(&"hello".into());
        assert_eq!(messages, vec![ChatMessage::user("hello")]);
    }

    #[test]
    fn message_sequence_passes_through() {
        let conversation = vec![ChatMessage::system("s"), ChatMessage::user("u")];
        let messages = normalize(&conversation.clone().into());
        assert_eq!(messages, conversation);
    }

    #[test]
    fn json_message_array_passes_through() {
        let value = json!([
            {"role": "system", "content": "s"},
            {"role": "assistant", "content": "a"},
        ]);
        let messages = normalize(&value.into());
        assert_eq!(
            messages,
            vec![ChatMessage::system("s"), ChatMessage::assistant("a")]
        );
    }

    #[test]
    fn input_field_becomes_user_message() {
        let messages = normalize(&json!({"input": "question"}).into());
        assert_eq!(messages, vec![ChatMessage::user("question")]);
    }

    #[test]
    fn messages_field_coerces_third_party_roles() {
        let value = json!({"messages": [
            {"role": "human", "content": "hi"},
            {"role": "ai", "content": "hello"},
            {"role": "critic", "content": "hmm"},
        ]});
        let messages = normalize(&value.into());
        assert_eq!(
            messages,
            vec![
                ChatMessage::user("hi"),
                ChatMessage::assistant("hello"),
                ChatMessage::user("hmm"),
            ]
        );
    }

    #[test]
    fn nested_single_prompt() {
        let messages = normalize(&json!({"prompt": {"value": "p"}}).into());
        assert_eq!(messages, vec![ChatMessage::user("p")]);

        let messages = normalize(&json!({"prompt": "p"}).into());
        assert_eq!(messages, vec![ChatMessage::user("p")]);
    }

    #[test]
    fn prompt_parts_join_non_empty_fragments() {
        let value = json!({"prompt": {"parts": [
            {"text": "a"},
            {"text": ""},
            {"image": "ignored"},
            {"text": "b"},
        ]}});
        let messages = normalize(&value.into());
        assert_eq!(messages, vec![ChatMessage::user("a\nb")]);
    }

    #[test]
    fn prompt_parts_honor_role_hint() {
        let value = json!({"parts": [{"text": "x"}], "role": "system"});
        let messages = normalize(&value.into());
        assert_eq!(messages, vec![ChatMessage::system("x")]);
    }

    #[test]
    fn unrecognized_shape_serializes() {
        let value = json!({"weird": {"nested": 1}});
        let messages = normalize(&value.clone().into());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(
            serde_json::from_str::<Value>(&messages[0].content).unwrap(),
            value
        );
    }

    #[test]
    fn all_empty_messages_degrade_to_empty_user_message() {
        let value = json!({"messages": [
            {"role": "user", "content": ""},
            {"role": "assistant", "content": ""},
        ]});
        let messages = normalize(&value.into());
        assert_eq!(messages, vec![ChatMessage::user("")]);
    }

    #[test]
    fn content_less_entries_are_dropped() {
        let value = json!({"messages": [
            {"role": "user"},
            {"role": "assistant", "content": "kept"},
        ]});
        let messages = normalize(&value.into());
        assert_eq!(messages, vec![ChatMessage::assistant("kept")]);
    }

    #[test]
    fn non_message_array_falls_through_to_serialization() {
        let value = json!([1, 2, 3]);
        let messages = normalize(&value.into());
        assert_eq!(messages, vec![ChatMessage::user("[1,2,3]")]);
    }
}
