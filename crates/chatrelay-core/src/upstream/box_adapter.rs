//! Object-safe dynamic dispatch wrappers for the adapter traits.
//!
//! Same blanket-impl pattern for both traits:
//! 1. An object-safe `*Dyn` trait with boxed futures
//! 2. A blanket impl of it for every implementor of the RPITIT trait
//! 3. A `Box*` newtype that delegates

use std::future::Future;
use std::pin::Pin;

use chatrelay_types::chat::UserId;
use chatrelay_types::error::UpstreamError;
use chatrelay_types::session::SessionToken;

use super::adapter::{AdapterKind, ChatAdapter, SessionAdapter, UpstreamTurn};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait ChatAdapterDyn: Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> AdapterKind;

    fn send_boxed<'a>(
        &'a self,
        turn: &'a UpstreamTurn,
    ) -> BoxFuture<'a, Result<serde_json::Value, UpstreamError>>;
}

impl<T: ChatAdapter> ChatAdapterDyn for T {
    fn name(&self) -> &str {
        ChatAdapter::name(self)
    }

    fn kind(&self) -> AdapterKind {
        ChatAdapter::kind(self)
    }

    fn send_boxed<'a>(
        &'a self,
        turn: &'a UpstreamTurn,
    ) -> BoxFuture<'a, Result<serde_json::Value, UpstreamError>> {
        Box::pin(self.send(turn))
    }
}

/// Type-erased chat adapter.
pub struct BoxChatAdapter {
    inner: Box<dyn ChatAdapterDyn + Send + Sync>,
}

impl BoxChatAdapter {
    pub fn new<T: ChatAdapter + 'static>(adapter: T) -> Self {
        Self {
            inner: Box::new(adapter),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn kind(&self) -> AdapterKind {
        self.inner.kind()
    }

    pub async fn send(&self, turn: &UpstreamTurn) -> Result<serde_json::Value, UpstreamError> {
        self.inner.send_boxed(turn).await
    }
}

pub trait SessionAdapterDyn: Send + Sync {
    fn name(&self) -> &str;

    fn create_session_boxed<'a>(
        &'a self,
        workflow_id: &'a str,
        user_id: Option<&'a UserId>,
    ) -> BoxFuture<'a, Result<SessionToken, UpstreamError>>;
}

impl<T: SessionAdapter> SessionAdapterDyn for T {
    fn name(&self) -> &str {
        SessionAdapter::name(self)
    }

    fn create_session_boxed<'a>(
        &'a self,
        workflow_id: &'a str,
        user_id: Option<&'a UserId>,
    ) -> BoxFuture<'a, Result<SessionToken, UpstreamError>> {
        Box::pin(self.create_session(workflow_id, user_id))
    }
}

/// Type-erased session adapter.
pub struct BoxSessionAdapter {
    inner: Box<dyn SessionAdapterDyn + Send + Sync>,
}

impl BoxSessionAdapter {
    pub fn new<T: SessionAdapter + 'static>(adapter: T) -> Self {
        Self {
            inner: Box::new(adapter),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn create_session(
        &self,
        workflow_id: &str,
        user_id: Option<&UserId>,
    ) -> Result<SessionToken, UpstreamError> {
        self.inner.create_session_boxed(workflow_id, user_id).await
    }
}
