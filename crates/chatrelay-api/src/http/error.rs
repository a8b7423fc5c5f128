//! Application error type mapping to HTTP status codes.

use axum::extract::rejection::BytesRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_types::error::RelayError;

/// Handler failure rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub enum AppError {
    Relay(RelayError),
    /// The request body could not be buffered (too large, aborted).
    /// Keeps the extractor's status.
    Body(BytesRejection),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Body(rejection)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Relay(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                error_response(status, &err.to_string())
            }
            AppError::Body(rejection) => {
                tracing::warn!(status = %rejection.status(), "Request body rejected");
                error_response(rejection.status(), &rejection.body_text())
            }
        }
    }
}

/// JSON error body with the given status.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        json!({ "error": message }).to_string(),
    )
        .into_response()
}
