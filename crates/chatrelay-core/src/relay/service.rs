//! Relay service: session-token issuance and chat routing.
//!
//! Holds no per-request state. The only shared resource is the set of
//! upstream adapters built once from static configuration; when no
//! credential is configured there are no adapters and every
//! credential-requiring operation fails with a configuration error.

use chatrelay_types::chat::{ChatReply, ChatRequest};
use chatrelay_types::error::RelayError;
use chatrelay_types::session::{SessionRequest, SessionToken};

use crate::upstream::adapter::UpstreamTurn;
use crate::upstream::box_adapter::{BoxChatAdapter, BoxSessionAdapter};

use super::normalize::normalize;

/// Client-facing message when session creation fails upstream.
const SESSION_FAILED: &str = "Failed to create ChatKit session";

/// Client-facing message when no chat path produced an answer.
const CHAT_FAILED: &str = "Failed to get AI response";

/// Upstream adapters available to the relay.
pub struct UpstreamAdapters {
    pub session: BoxSessionAdapter,
    /// Plain completion, also the degrade target for workflow turns.
    pub completion: BoxChatAdapter,
    /// Workflow endpoint shapes in priority order.
    pub workflows: Vec<BoxChatAdapter>,
}

/// Stateless relay between the chat client and the upstream API.
pub struct RelayService {
    upstream: Option<UpstreamAdapters>,
}

impl RelayService {
    /// Create a relay. `None` means no upstream credential is configured.
    pub fn new(upstream: Option<UpstreamAdapters>) -> Self {
        Self { upstream }
    }

    /// Whether an upstream credential is configured.
    pub fn is_configured(&self) -> bool {
        self.upstream.is_some()
    }

    /// Adapters, or the configuration error callers must surface.
    pub fn upstream(&self) -> Result<&UpstreamAdapters, RelayError> {
        self.upstream.as_ref().ok_or_else(RelayError::missing_credential)
    }

    /// Issue a session token for the hosted widget.
    ///
    /// The credential is checked before the request is even looked at.
    pub async fn issue_session_token(
        &self,
        request: SessionRequest,
    ) -> Result<SessionToken, RelayError> {
        let upstream = self.upstream()?;

        let workflow_id = non_blank(request.workflow_id.as_deref())
            .ok_or_else(RelayError::missing_workflow)?;

        upstream
            .session
            .create_session(workflow_id, request.user_id.as_ref())
            .await
            .map_err(|err| {
                tracing::error!(
                    adapter = upstream.session.name(),
                    status = ?err.status,
                    error = %err.message,
                    "Session creation failed"
                );
                RelayError::upstream(&err, SESSION_FAILED)
            })
    }

    /// Run one chat turn.
    ///
    /// Without a workflow id the turn goes straight to plain completion.
    /// With one, each workflow adapter is tried in order and the first
    /// success wins; if none succeeds the turn is retried once as a plain
    /// completion before an upstream error is surfaced.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, RelayError> {
        let message = non_blank(request.message.as_deref())
            .ok_or_else(RelayError::missing_message)?
            .to_string();

        let upstream = self.upstream()?;

        let turn = UpstreamTurn {
            message,
            previous: request.thread_id.filter(|handle| !handle.is_empty()),
            workflow_id: non_blank(request.workflow_id.as_deref()).map(str::to_string),
            user_id: request.user_id,
        };

        if turn.workflow_id.is_some() {
            for adapter in &upstream.workflows {
                match adapter.send(&turn).await {
                    Ok(payload) => {
                        tracing::debug!(adapter = adapter.name(), "Workflow turn answered");
                        return Ok(normalize(&payload, turn.previous.as_ref()));
                    }
                    Err(err) => {
                        tracing::warn!(
                            adapter = adapter.name(),
                            kind = %adapter.kind(),
                            status = ?err.status,
                            error = %err.message,
                            "Workflow endpoint failed, trying next"
                        );
                    }
                }
            }
            tracing::warn!(
                workflow_id = turn.workflow_id.as_deref().unwrap_or_default(),
                "No workflow endpoint answered, degrading to plain completion"
            );
        }

        let plain = turn.without_workflow();
        match upstream.completion.send(&plain).await {
            Ok(payload) => Ok(normalize(&payload, plain.previous.as_ref())),
            Err(err) => {
                tracing::error!(
                    adapter = upstream.completion.name(),
                    kind = %upstream.completion.kind(),
                    status = ?err.status,
                    error = %err.message,
                    "Completion failed"
                );
                Err(RelayError::upstream(&err, CHAT_FAILED))
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
