use thiserror::Error;

/// Status reported when the upstream failed without producing one
/// (transport failure, undecodable body).
pub const BAD_GATEWAY: u16 = 502;

/// Errors surfaced by the relay to its HTTP callers.
///
/// Every variant maps to a status code via [`RelayError::status_code`] and
/// renders as `{"error": "<display>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Caller omitted a required field.
    #[error("{0}")]
    Validation(String),

    /// Server is missing a required secret.
    #[error("{0}")]
    Configuration(String),

    /// Upstream call returned non-success.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Not found")]
    NotFound,

    /// Anything uncaught.
    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    pub fn missing_message() -> Self {
        RelayError::Validation("Message is required".to_string())
    }

    pub fn missing_workflow() -> Self {
        RelayError::Validation("Workflow ID is required".to_string())
    }

    pub fn invalid_body() -> Self {
        RelayError::Validation("Invalid JSON body".to_string())
    }

    pub fn missing_credential() -> Self {
        RelayError::Configuration("API key not configured".to_string())
    }

    pub fn internal() -> Self {
        RelayError::Internal("Internal server error".to_string())
    }

    /// Wrap an upstream failure with the client-facing message, forwarding
    /// the upstream status (502 when it produced none).
    pub fn upstream(err: &UpstreamError, message: &str) -> Self {
        RelayError::Upstream {
            status: err.status.unwrap_or(BAD_GATEWAY),
            message: message.to_string(),
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Validation(_) => 400,
            RelayError::Configuration(_) => 500,
            RelayError::Upstream { status, .. } => *status,
            RelayError::NotFound => 404,
            RelayError::Internal(_) => 500,
        }
    }
}

/// Failure of one upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("upstream error (status {status:?}): {message}")]
pub struct UpstreamError {
    /// HTTP status returned by the upstream, if the call got that far.
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

/// Errors seen by the chat client when calling the relay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("could not decode relay response: {0}")]
    Decode(String),
}

/// Errors loading relay configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}
