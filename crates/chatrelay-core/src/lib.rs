//! Relay logic and client-side session handling.
//!
//! This crate defines the "ports" the infrastructure layer implements
//! (upstream adapters, the relay client) together with the pure logic that
//! sits between them: request routing with the workflow-then-degrade
//! policy, response normalization, origin gating and the chat session
//! state machine. It never performs IO itself.

pub mod client;
pub mod cors;
pub mod relay;
pub mod upstream;
