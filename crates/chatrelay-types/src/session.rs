//! Session-token issuance types (`POST /chatkit/session`).

use serde::{Deserialize, Serialize};

use crate::chat::UserId;

/// Body of `POST /chatkit/session`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Short-lived credential scoped to one workflow session, safe to hand to
/// the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    pub client_secret: String,
}
