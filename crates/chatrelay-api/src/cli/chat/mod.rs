//! Interactive terminal chat through a relay.
//!
//! Entry point: [`loop_runner::run_chat_loop`]. Conversation state lives in
//! `chatrelay_core::client::session::ChatSession`; this module only
//! handles input, rendering and the typing indicator.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;

/// How the client talks to the relay, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Terminal chat loop over `/chat`.
    Manual,
    /// Issue a `/chatkit/session` token for a hosted widget and exit.
    Hosted,
}
