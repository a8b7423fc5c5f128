//! Reduction of heterogeneous upstream payloads to one client-facing shape.
//!
//! Recognized shapes, probed in order:
//! - Responses API: `output[].content[]` blocks of type `output_text`, or
//!   the `output_text` convenience string
//! - ChatKit thread message: `content[]` (optionally under `item`) blocks of
//!   type `output_text` or `text`
//! - Chat completion: `choices[].message.content` as a string
//!
//! A well-formed payload with no recognizable text yields
//! [`NO_RESPONSE_TEXT`]; normalization itself never fails.

use serde_json::Value;

use chatrelay_types::chat::{ChatReply, ConversationHandle};

/// Placeholder shown when the upstream answered without usable text.
pub const NO_RESPONSE_TEXT: &str = "No response received.";

type TextExtractor = fn(&Value) -> Option<&str>;

const TEXT_EXTRACTORS: &[TextExtractor] = &[
    responses_output,
    responses_output_text,
    chatkit_content,
    completion_choices,
];

/// Build the client reply from an upstream payload.
///
/// The handle falls back to `previous` when the upstream issued none, so a
/// client never loses continuity because of a terse payload.
pub fn normalize(payload: &Value, previous: Option<&ConversationHandle>) -> ChatReply {
    let response = extract_text(payload)
        .unwrap_or(NO_RESPONSE_TEXT)
        .to_string();
    let thread_id = extract_handle(payload).or_else(|| previous.cloned());

    ChatReply {
        response,
        thread_id,
    }
}

/// First non-empty text block in the payload, whichever shape it uses.
pub fn extract_text(payload: &Value) -> Option<&str> {
    TEXT_EXTRACTORS.iter().find_map(|extract| extract(payload))
}

/// Continuation handle issued by the upstream: `thread_id` for ChatKit
/// threads, otherwise the response `id`.
pub fn extract_handle(payload: &Value) -> Option<ConversationHandle> {
    ["thread_id", "id"]
        .iter()
        .filter_map(|key| payload.get(key).and_then(Value::as_str))
        .find(|id| !id.is_empty())
        .map(ConversationHandle::new)
}

fn responses_output(payload: &Value) -> Option<&str> {
    payload
        .get("output")?
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .find_map(|block| text_block(block, &["output_text"]))
}

fn responses_output_text(payload: &Value) -> Option<&str> {
    payload
        .get("output_text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

fn chatkit_content(payload: &Value) -> Option<&str> {
    let content = payload
        .get("content")
        .or_else(|| payload.get("item").and_then(|item| item.get("content")))?;
    content
        .as_array()?
        .iter()
        .find_map(|block| text_block(block, &["output_text", "text"]))
}

fn completion_choices(payload: &Value) -> Option<&str> {
    payload
        .get("choices")?
        .as_array()?
        .iter()
        .filter_map(|choice| choice.get("message")?.get("content")?.as_str())
        .find(|text| !text.is_empty())
}

fn text_block<'a>(block: &'a Value, types: &[&str]) -> Option<&'a str> {
    let kind = block.get("type").and_then(Value::as_str)?;
    if !types.contains(&kind) {
        return None;
    }
    block
        .get("text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
