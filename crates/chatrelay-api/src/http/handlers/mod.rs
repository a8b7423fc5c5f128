//! HTTP request handlers.

pub mod chat;
pub mod health;
pub mod session;

use axum::body::Bytes;
use serde_json::Value;

use chatrelay_types::error::RelayError;

/// Parse a JSON request body.
///
/// Any well-formed JSON is accepted; field extraction is lenient so a
/// missing or wrongly-typed field is reported by the validation that
/// follows rather than as a parse failure.
pub(crate) fn parse_json_body(body: &Bytes) -> Result<Value, RelayError> {
    serde_json::from_slice(body).map_err(|_| RelayError::invalid_body())
}

/// String field of a JSON object, `None` when absent or not a string.
pub(crate) fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
