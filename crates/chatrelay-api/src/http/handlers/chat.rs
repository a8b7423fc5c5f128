//! `POST /chat`: one chat turn, plain or workflow.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use chatrelay_types::chat::{ChatReply, ChatRequest, ConversationHandle, UserId};

use super::{parse_json_body, str_field};
use crate::http::error::AppError;
use crate::state::AppState;

pub async fn chat(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let request = chat_request(&parse_json_body(&body?)?);
    let reply = state.relay.chat(request).await?;
    Ok(Json(reply))
}

fn chat_request(value: &Value) -> ChatRequest {
    ChatRequest {
        message: str_field(value, "message"),
        thread_id: str_field(value, "threadId").map(ConversationHandle),
        workflow_id: str_field(value, "workflowId"),
        user_id: str_field(value, "userId").map(UserId),
    }
}
