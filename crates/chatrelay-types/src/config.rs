//! Relay configuration types.
//!
//! `RelayConfig` may be read from an optional TOML file; the upstream
//! credential is never read from the file, only from the environment.

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Default upstream API root.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.openai.com/v1";

/// General-purpose model used for plain completions.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Upstream endpoint shapes that can run a named workflow, tried in the
/// configured order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowEndpoint {
    /// Direct ChatKit workflow message API.
    ChatkitMessages,
    /// Responses API with a `workflow` attachment.
    ResponsesWorkflow,
}

impl fmt::Display for WorkflowEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowEndpoint::ChatkitMessages => write!(f, "chatkit_messages"),
            WorkflowEndpoint::ResponsesWorkflow => write!(f, "responses_workflow"),
        }
    }
}

impl FromStr for WorkflowEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chatkit_messages" => Ok(WorkflowEndpoint::ChatkitMessages),
            "responses_workflow" => Ok(WorkflowEndpoint::ResponsesWorkflow),
            other => Err(format!("invalid workflow endpoint: '{other}'")),
        }
    }
}

/// Static relay configuration, shared read-only by every request.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Upstream credential. Environment only.
    #[serde(skip)]
    pub api_key: Option<SecretString>,

    /// Comma-separated origin allow-list. `*` allows all, `null` permits
    /// pages opened from a local file.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,

    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_workflow_endpoints")]
    pub workflow_endpoints: Vec<WorkflowEndpoint>,

    /// Per-call upstream timeout. Unset keeps the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_allowed_origins() -> String {
    "*".to_string()
}

fn default_upstream_base_url() -> String {
    DEFAULT_UPSTREAM_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_workflow_endpoints() -> Vec<WorkflowEndpoint> {
    vec![
        WorkflowEndpoint::ChatkitMessages,
        WorkflowEndpoint::ResponsesWorkflow,
    ]
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            allowed_origins: default_allowed_origins(),
            upstream_base_url: default_upstream_base_url(),
            model: default_model(),
            workflow_endpoints: default_workflow_endpoints(),
            request_timeout_secs: None,
        }
    }
}
