//! Shared wire and domain types for the chat relay.
//!
//! This crate holds the shapes exchanged between the chat client, the relay
//! and its configuration: chat turns, session tokens, the opaque
//! conversation handle, and the error taxonomy surfaced over HTTP.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod session;
