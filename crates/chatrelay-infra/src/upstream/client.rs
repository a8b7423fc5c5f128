//! Shared authenticated HTTP client for the upstream API.
//!
//! The credential is wrapped in [`SecretString`] and only exposed when the
//! `Authorization` header is built. It never appears in Debug output or
//! tracing logs.

use std::time::Duration;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use chatrelay_types::error::{ConfigError, UpstreamError};

/// Beta header required by the ChatKit endpoints.
pub const CHATKIT_BETA: (&str, &str) = ("OpenAI-Beta", "chatkit_beta=v1");

/// Authenticated JSON client rooted at the upstream base URL.
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
    model: String,
}

impl UpstreamClient {
    /// Build a client.
    ///
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(
        api_key: SecretString,
        base_url: &str,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::Invalid {
            key: "upstream_base_url".to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid {
                key: "upstream_base_url".to_string(),
                message: format!("'{base_url}' cannot be used as a base URL"),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ConfigError::Invalid {
            key: "http_client".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url,
            api_key,
            model: model.into(),
        })
    }

    /// Model used for plain completions.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Base URL with `segments` appended, each percent-encoded.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// POST a JSON body and decode a JSON reply.
    ///
    /// Non-2xx replies become [`UpstreamError`] carrying the status and the
    /// upstream body text; transport and decode failures carry no status.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
        extra_header: Option<(&str, &str)>,
    ) -> Result<Value, UpstreamError> {
        let mut request = self
            .http
            .post(url.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(body);
        if let Some((name, value)) = extra_header {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::debug!(%url, status = status.as_u16(), body = %error_body, "Upstream rejected request");
            return Err(UpstreamError::status(status.as_u16(), error_body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::transport(format!("failed to parse response: {e}")))
    }
}

// UpstreamClient does not derive Debug; the credential stays out of logs.
