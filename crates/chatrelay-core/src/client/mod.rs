//! Chat client logic, independent of any particular front-end.
//!
//! - `RelayApi`: port for calling the relay over HTTP
//! - `ChatSession`: per-tab conversation state with single-flight sends
//! - `markup`: minimal inline formatting for rendered messages

pub mod api;
pub mod markup;
pub mod session;
