//! ChatKit session issuance (`POST /chatkit/sessions`).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use chatrelay_core::upstream::adapter::SessionAdapter;
use chatrelay_types::chat::UserId;
use chatrelay_types::error::UpstreamError;
use chatrelay_types::session::SessionToken;

use super::client::{UpstreamClient, CHATKIT_BETA};
use super::WorkflowRef;

#[derive(Debug, Serialize)]
struct CreateSessionBody<'a> {
    workflow: WorkflowRef<'a>,
    user: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateSessionReply {
    client_secret: ClientSecret,
}

/// Older replies carry the secret as a bare string, newer ones as
/// `{"value": ..., "expires_at": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClientSecret {
    Plain(String),
    Wrapped { value: String },
}

impl ClientSecret {
    fn into_value(self) -> String {
        match self {
            ClientSecret::Plain(value) | ClientSecret::Wrapped { value } => value,
        }
    }
}

/// Creates ChatKit sessions and hands back their client secret.
pub struct ChatKitSessionAdapter {
    client: Arc<UpstreamClient>,
}

impl ChatKitSessionAdapter {
    pub fn new(client: Arc<UpstreamClient>) -> Self {
        Self { client }
    }
}

impl SessionAdapter for ChatKitSessionAdapter {
    fn name(&self) -> &str {
        "chatkit-sessions"
    }

    async fn create_session(
        &self,
        workflow_id: &str,
        user_id: Option<&UserId>,
    ) -> Result<SessionToken, UpstreamError> {
        let body = CreateSessionBody {
            workflow: WorkflowRef { id: workflow_id },
            user: user_id.map(UserId::as_str).unwrap_or("anonymous"),
        };
        let url = self.client.url(&["chatkit", "sessions"]);

        let payload = self.client.post_json(url, &body, Some(CHATKIT_BETA)).await?;
        let reply: CreateSessionReply = serde_json::from_value(payload).map_err(|e| {
            UpstreamError::transport(format!("session reply missing client_secret: {e}"))
        })?;

        Ok(SessionToken {
            client_secret: reply.client_secret.into_value(),
        })
    }
}
