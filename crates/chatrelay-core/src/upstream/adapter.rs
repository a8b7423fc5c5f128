//! Adapter trait definitions.
//!
//! Uses native async fn in traits (RPITIT). Concrete adapters live in
//! chatrelay-infra; adding a new upstream endpoint shape means adding an
//! adapter, not touching the relay.

use std::fmt;
use std::future::Future;

use chatrelay_types::chat::{ConversationHandle, UserId};
use chatrelay_types::error::UpstreamError;
use chatrelay_types::session::SessionToken;

/// Which role an adapter plays in the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    /// General-purpose single-turn completion.
    Completion,
    /// Invocation of a named upstream workflow.
    Workflow,
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterKind::Completion => write!(f, "completion"),
            AdapterKind::Workflow => write!(f, "workflow"),
        }
    }
}

/// One chat turn as handed to an upstream adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTurn {
    pub message: String,
    /// Continuation reference from the previous turn.
    pub previous: Option<ConversationHandle>,
    /// Workflow to attach. Completion adapters ignore it.
    pub workflow_id: Option<String>,
    pub user_id: Option<UserId>,
}

impl UpstreamTurn {
    /// The same turn with the workflow attachment removed.
    pub fn without_workflow(&self) -> Self {
        Self {
            workflow_id: None,
            ..self.clone()
        }
    }

    /// User identifier forwarded upstream, `anonymous` when absent.
    pub fn user_or_anonymous(&self) -> &str {
        self.user_id.as_ref().map(UserId::as_str).unwrap_or("anonymous")
    }
}

/// Issues session tokens for the hosted chat widget.
pub trait SessionAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn create_session(
        &self,
        workflow_id: &str,
        user_id: Option<&UserId>,
    ) -> impl Future<Output = Result<SessionToken, UpstreamError>> + Send;
}

/// Runs a chat turn against one upstream endpoint shape.
///
/// Returns the raw upstream JSON payload; shape reduction happens in
/// [`crate::relay::normalize`].
pub trait ChatAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> AdapterKind;

    fn send(
        &self,
        turn: &UpstreamTurn,
    ) -> impl Future<Output = Result<serde_json::Value, UpstreamError>> + Send;
}
