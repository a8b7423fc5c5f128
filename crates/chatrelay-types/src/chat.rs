//! Chat turn types exchanged between the client and the relay.
//!
//! Field names on the wire are camelCase (`threadId`, `workflowId`,
//! `userId`) because the browser widget speaks that dialect.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque continuation token issued by the upstream on a conversation's
/// first reply and echoed back by the client on later turns.
///
/// Never parsed, only stored and echoed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHandle(pub String);

impl ConversationHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty handle carries no continuity and is treated as absent.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ConversationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-session device identifier forwarded to the upstream as `user`.
///
/// Used only for upstream analytics/session correlation; it carries no
/// access-control weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Number of random base-36 characters after the `user_` prefix.
    const RANDOM_LEN: usize = 13;

    /// Generate a fresh `user_xxxxxxxxxxxxx` identifier.
    pub fn generate() -> Self {
        const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

        let mut value = u128::from_le_bytes(*Uuid::new_v4().as_bytes());
        let mut id = String::with_capacity(5 + Self::RANDOM_LEN);
        id.push_str("user_");
        for _ in 0..Self::RANDOM_LEN {
            id.push(ALPHABET[(value % 36) as usize] as char);
            value /= 36;
        }
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /chat`.
///
/// `message` is optional at the type level so that a missing field surfaces
/// as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<ConversationHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Successful reply of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Display text extracted from the upstream payload.
    pub response: String,
    /// Handle to send back on the next turn. Omitted when the upstream
    /// issued none and the client sent none.
    #[serde(rename = "threadId", default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<ConversationHandle>,
}

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One rendered message in the client's in-memory transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_names() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message":"hi","threadId":"resp_1","workflowId":"wf_1","userId":"user_abc"}"#,
        )
        .unwrap();
        assert_eq!(req.message.as_deref(), Some("hi"));
        assert_eq!(req.thread_id, Some(ConversationHandle::new("resp_1")));
        assert_eq!(req.workflow_id.as_deref(), Some("wf_1"));
        assert_eq!(req.user_id, Some(UserId("user_abc".to_string())));
    }

    #[test]
    fn test_chat_request_accepts_null_thread_and_missing_message() {
        let req: ChatRequest = serde_json::from_str(r#"{"threadId":null}"#).unwrap();
        assert!(req.message.is_none());
        assert!(req.thread_id.is_none());
    }

    #[test]
    fn test_chat_reply_omits_missing_thread_id() {
        let reply = ChatReply {
            response: "hello".to_string(),
            thread_id: None,
        };
        assert_eq!(serde_json::to_string(&reply).unwrap(), r#"{"response":"hello"}"#);

        let reply = ChatReply {
            response: "hello".to_string(),
            thread_id: Some(ConversationHandle::new("resp_9")),
        };
        assert_eq!(
            serde_json::to_string(&reply).unwrap(),
            r#"{"response":"hello","threadId":"resp_9"}"#
        );
    }

    #[test]
    fn test_user_id_shape() {
        let id = UserId::generate();
        let suffix = id.as_str().strip_prefix("user_").unwrap();
        assert_eq!(suffix.len(), 13);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_user_ids_differ() {
        assert_ne!(UserId::generate(), UserId::generate());
    }
}
