//! Per-tab chat session state.
//!
//! All conversation state (phase, transcript, continuation handle) lives in
//! one `ChatSession` value owned by the front-end. Sending is single-flight:
//! while a turn is awaiting the relay, further sends are ignored, not
//! queued.

use chatrelay_types::chat::{
    ChatReply, ChatRequest, ConversationHandle, Role, TranscriptEntry, UserId,
};
use chatrelay_types::error::ClientError;

use super::api::RelayApi;

/// Canned prompts offered on the welcome screen.
pub const QUICK_PROMPTS: [&str; 4] = [
    "What is the vacation policy?",
    "How do I submit an expense report?",
    "What are the health benefits?",
    "What are the company holidays?",
];

/// Marker left in the relay URL until the deployment is configured.
pub const PLACEHOLDER_MARKER: &str = "YOUR_SUBDOMAIN";

/// Transient notification shown when a turn fails.
pub const ERROR_TOAST: &str = "Failed to get a response. Please try again.";

/// Transcript message appended when a turn fails.
pub const APOLOGY: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

/// Transcript message appended when the relay address was never configured.
pub const DEMO_NOTICE: &str = "Thanks for your question! I'm currently in demo mode because the API proxy hasn't been configured yet. \
Once the relay is deployed and the configuration is updated, I'll be able to answer your questions using the company knowledge base.\n\n\
To set me up, point the client at your relay with --relay-url.";

/// Whether a relay URL still carries the unconfigured placeholder.
pub fn is_placeholder_url(url: &str) -> bool {
    url.contains(PLACEHOLDER_MARKER)
}

/// Where the session is in its send cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No messages yet; quick prompts are offered.
    Welcome,
    /// A turn is in flight; input is disabled.
    Awaiting,
    /// Ready for the next turn.
    Idle,
}

/// What happened to a send, for the front-end to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank text or a turn already in flight.
    Ignored,
    /// The assistant replied.
    Replied,
    /// The turn failed; show `toast` if present.
    Failed { toast: Option<String> },
}

/// Conversation state for one client tab.
#[derive(Debug, Clone)]
pub struct ChatSession {
    phase: Phase,
    transcript: Vec<TranscriptEntry>,
    handle: Option<ConversationHandle>,
    user_id: UserId,
    workflow_id: Option<String>,
    demo_mode: bool,
}

impl ChatSession {
    /// Create a session in the `Welcome` phase.
    ///
    /// `demo_mode` is resolved once by the caller, usually from
    /// [`is_placeholder_url`].
    pub fn new(user_id: UserId, workflow_id: Option<String>, demo_mode: bool) -> Self {
        Self {
            phase: Phase::Welcome,
            transcript: Vec::new(),
            handle: None,
            user_id,
            workflow_id,
            demo_mode,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn handle(&self) -> Option<&ConversationHandle> {
        self.handle.as_ref()
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == Phase::Awaiting
    }

    /// Start a turn.
    ///
    /// Returns `None` without touching state when `text` is blank or a turn
    /// is already in flight. Otherwise appends the user message, moves to
    /// `Awaiting` and returns the request to send.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        let content = text.trim();
        if content.is_empty() || self.is_awaiting() {
            return None;
        }

        self.transcript
            .push(TranscriptEntry::new(Role::User, content));
        self.phase = Phase::Awaiting;

        Some(ChatRequest {
            message: Some(content.to_string()),
            thread_id: self.handle.clone(),
            workflow_id: self.workflow_id.clone(),
            user_id: Some(self.user_id.clone()),
        })
    }

    /// Finish the in-flight turn with the relay's result.
    ///
    /// Always leaves the session `Idle`. Raw relay error text never reaches
    /// the transcript.
    pub fn finish_send(&mut self, result: Result<ChatReply, ClientError>) -> SendOutcome {
        if !self.is_awaiting() {
            return SendOutcome::Ignored;
        }
        self.phase = Phase::Idle;

        match result {
            Ok(reply) => {
                if let Some(handle) = reply.thread_id.filter(|h| !h.is_empty()) {
                    self.handle = Some(handle);
                }
                self.transcript
                    .push(TranscriptEntry::new(Role::Assistant, reply.response));
                SendOutcome::Replied
            }
            Err(err) => {
                tracing::warn!(error = %err, "Chat turn failed");
                if self.demo_mode {
                    self.transcript
                        .push(TranscriptEntry::new(Role::Assistant, DEMO_NOTICE));
                    SendOutcome::Failed { toast: None }
                } else {
                    self.transcript
                        .push(TranscriptEntry::new(Role::Assistant, APOLOGY));
                    SendOutcome::Failed {
                        toast: Some(ERROR_TOAST.to_string()),
                    }
                }
            }
        }
    }

    /// Send `text` through `relay` and record the outcome.
    pub async fn send<R: RelayApi>(&mut self, relay: &R, text: &str) -> SendOutcome {
        let Some(request) = self.begin_send(text) else {
            return SendOutcome::Ignored;
        };
        let result = relay.chat(&request).await;
        self.finish_send(result)
    }

    /// Send one of the [`QUICK_PROMPTS`]. Out-of-range indexes are ignored.
    pub async fn quick_prompt<R: RelayApi>(&mut self, relay: &R, index: usize) -> SendOutcome {
        match QUICK_PROMPTS.get(index) {
            Some(prompt) => self.send(relay, prompt).await,
            None => SendOutcome::Ignored,
        }
    }
}
