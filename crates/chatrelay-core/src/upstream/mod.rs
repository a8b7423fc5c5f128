//! Upstream adapter abstractions.
//!
//! - `SessionAdapter`: issues short-lived session tokens for a workflow
//! - `ChatAdapter`: runs one chat turn against one upstream endpoint shape,
//!   either a plain completion or a workflow invocation
//! - `BoxSessionAdapter` / `BoxChatAdapter`: object-safe wrappers so the
//!   relay can hold an ordered list of heterogeneous adapters

pub mod adapter;
pub mod box_adapter;
