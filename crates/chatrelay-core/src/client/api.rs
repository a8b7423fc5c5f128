//! Port for calling the relay's HTTP contract.
//!
//! The reqwest implementation lives in chatrelay-infra (`RelayClient`).

use std::future::Future;

use chatrelay_types::chat::{ChatReply, ChatRequest};
use chatrelay_types::error::ClientError;
use chatrelay_types::session::{SessionRequest, SessionToken};

pub trait RelayApi: Send + Sync {
    /// `POST /chat`.
    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, ClientError>> + Send;

    /// `POST /chatkit/session`.
    fn issue_session(
        &self,
        request: &SessionRequest,
    ) -> impl Future<Output = Result<SessionToken, ClientError>> + Send;

    /// `GET /health`.
    fn health(&self) -> impl Future<Output = Result<(), ClientError>> + Send;
}
