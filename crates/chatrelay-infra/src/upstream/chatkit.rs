//! ChatKit workflow message adapter
//! (`POST /chatkit/workflows/{workflow_id}/messages`).
//!
//! Continuity uses the ChatKit thread id, which the normalizer picks up
//! from the reply's `thread_id`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use chatrelay_core::upstream::adapter::{AdapterKind, ChatAdapter, UpstreamTurn};
use chatrelay_types::error::UpstreamError;

use super::client::{UpstreamClient, CHATKIT_BETA};

#[derive(Debug, Serialize)]
struct WorkflowMessageBody<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_id: Option<&'a str>,
    user: &'a str,
}

pub struct ChatKitWorkflowAdapter {
    client: Arc<UpstreamClient>,
}

impl ChatKitWorkflowAdapter {
    pub fn new(client: Arc<UpstreamClient>) -> Self {
        Self { client }
    }
}

impl ChatAdapter for ChatKitWorkflowAdapter {
    fn name(&self) -> &str {
        "chatkit-messages"
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::Workflow
    }

    async fn send(&self, turn: &UpstreamTurn) -> Result<Value, UpstreamError> {
        let workflow_id = turn.workflow_id.as_deref().ok_or_else(|| {
            UpstreamError::transport("workflow adapter called without a workflow id")
        })?;

        let body = WorkflowMessageBody {
            input: &turn.message,
            thread_id: turn.previous.as_ref().map(|h| h.as_str()),
            user: turn.user_or_anonymous(),
        };
        let url = self
            .client
            .url(&["chatkit", "workflows", workflow_id, "messages"]);

        self.client.post_json(url, &body, Some(CHATKIT_BETA)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::chat::ConversationHandle;
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_sends_to_workflow_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chatkit/workflows/wf_1/messages"))
            .and(header("openai-beta", "chatkit_beta=v1"))
            .and(body_json(json!({
                "input": "hi",
                "thread_id": "cthr_1",
                "user": "anonymous"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"thread_id": "cthr_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = UpstreamClient::new(
            SecretString::from("sk-test".to_string()),
            &format!("{}/v1", server.uri()),
            "gpt-4o",
            None,
        )
        .unwrap();
        let adapter = ChatKitWorkflowAdapter::new(Arc::new(client));

        let turn = UpstreamTurn {
            message: "hi".to_string(),
            previous: Some(ConversationHandle::new("cthr_1")),
            workflow_id: Some("wf_1".to_string()),
            user_id: None,
        };
        let payload = adapter.send(&turn).await.unwrap();
        assert_eq!(payload["thread_id"], "cthr_1");
    }

    #[tokio::test]
    async fn test_missing_workflow_id_fails_without_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = UpstreamClient::new(
            SecretString::from("sk-test".to_string()),
            &server.uri(),
            "gpt-4o",
            None,
        )
        .unwrap();
        let adapter = ChatKitWorkflowAdapter::new(Arc::new(client));

        let turn = UpstreamTurn {
            message: "hi".to_string(),
            previous: None,
            workflow_id: None,
            user_id: None,
        };
        assert!(adapter.send(&turn).await.is_err());
    }
}
