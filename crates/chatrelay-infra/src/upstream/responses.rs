//! Responses API adapter (`POST /responses`).
//!
//! Serves two roles: the plain single-turn completion, and (with
//! `attach_workflow`) the workflow variant that adds a `workflow` field to
//! the same request.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use chatrelay_core::upstream::adapter::{AdapterKind, ChatAdapter, UpstreamTurn};
use chatrelay_types::error::UpstreamError;

use super::client::UpstreamClient;
use super::WorkflowRef;

#[derive(Debug, Serialize)]
struct ResponsesBody<'a> {
    model: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_response_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow: Option<WorkflowRef<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
}

pub struct ResponsesAdapter {
    client: Arc<UpstreamClient>,
    attach_workflow: bool,
}

impl ResponsesAdapter {
    /// Plain completion with the general-purpose model.
    pub fn completion(client: Arc<UpstreamClient>) -> Self {
        Self {
            client,
            attach_workflow: false,
        }
    }

    /// Completion with the turn's workflow attached.
    pub fn workflow(client: Arc<UpstreamClient>) -> Self {
        Self {
            client,
            attach_workflow: true,
        }
    }

    fn body<'a>(&'a self, turn: &'a UpstreamTurn) -> ResponsesBody<'a> {
        let workflow = turn
            .workflow_id
            .as_deref()
            .filter(|_| self.attach_workflow)
            .map(|id| WorkflowRef { id });

        ResponsesBody {
            model: self.client.model(),
            input: &turn.message,
            previous_response_id: turn.previous.as_ref().map(|h| h.as_str()),
            user: workflow.as_ref().map(|_| turn.user_or_anonymous()),
            workflow,
        }
    }
}

impl ChatAdapter for ResponsesAdapter {
    fn name(&self) -> &str {
        if self.attach_workflow {
            "responses-workflow"
        } else {
            "responses"
        }
    }

    fn kind(&self) -> AdapterKind {
        if self.attach_workflow {
            AdapterKind::Workflow
        } else {
            AdapterKind::Completion
        }
    }

    async fn send(&self, turn: &UpstreamTurn) -> Result<Value, UpstreamError> {
        if self.attach_workflow && turn.workflow_id.is_none() {
            return Err(UpstreamError::transport("workflow adapter called without a workflow id"));
        }
        let url = self.client.url(&["responses"]);
        self.client.post_json(url, &self.body(turn), None).await
    }
}
