//! HTTP surface of the relay.
//!
//! Three routes (`/chatkit/session`, `/chat`, `/health`), a 404 fallback
//! and CORS headers on every response.

pub mod cors;
pub mod error;
pub mod handlers;
pub mod router;
