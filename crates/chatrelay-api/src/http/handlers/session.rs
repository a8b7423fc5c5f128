//! `POST /chatkit/session`: short-lived session token for the hosted
//! widget.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::Json;

use chatrelay_types::chat::UserId;
use chatrelay_types::session::{SessionRequest, SessionToken};

use super::{parse_json_body, str_field};
use crate::http::error::AppError;
use crate::state::AppState;

pub async fn issue_session(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SessionToken>, AppError> {
    // A missing credential is reported before the body is looked at.
    state.relay.upstream()?;

    let value = parse_json_body(&body?)?;
    let request = SessionRequest {
        workflow_id: str_field(&value, "workflowId"),
        user_id: str_field(&value, "userId").map(UserId),
    };

    let token = state.relay.issue_session_token(request).await?;
    Ok(Json(token))
}
