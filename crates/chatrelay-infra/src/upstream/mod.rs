//! Concrete upstream adapters over the shared [`client::UpstreamClient`].

pub mod chatkit;
pub mod client;
pub mod responses;
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use chatrelay_core::relay::service::UpstreamAdapters;
use chatrelay_core::upstream::box_adapter::{BoxChatAdapter, BoxSessionAdapter};
use chatrelay_types::config::{RelayConfig, WorkflowEndpoint};
use chatrelay_types::error::ConfigError;

use self::chatkit::ChatKitWorkflowAdapter;
use self::client::UpstreamClient;
use self::responses::ResponsesAdapter;
use self::session::ChatKitSessionAdapter;

/// `{"id": ...}` workflow reference shared by request bodies.
#[derive(Debug, Serialize)]
pub(crate) struct WorkflowRef<'a> {
    pub id: &'a str,
}

/// Build the adapter set for `config`.
///
/// Returns `Ok(None)` when no credential is configured; the relay still
/// starts and answers credential-gated routes with a configuration error.
pub fn build_adapters(config: &RelayConfig) -> Result<Option<UpstreamAdapters>, ConfigError> {
    let Some(api_key) = config.api_key.as_ref() else {
        tracing::warn!("No upstream API key configured; chat and session routes will fail");
        return Ok(None);
    };

    let client = Arc::new(UpstreamClient::new(
        SecretString::from(api_key.expose_secret().to_string()),
        &config.upstream_base_url,
        config.model.clone(),
        config.request_timeout_secs.map(Duration::from_secs),
    )?);

    let workflows = config
        .workflow_endpoints
        .iter()
        .map(|endpoint| match endpoint {
            WorkflowEndpoint::ChatkitMessages => {
                BoxChatAdapter::new(ChatKitWorkflowAdapter::new(Arc::clone(&client)))
            }
            WorkflowEndpoint::ResponsesWorkflow => {
                BoxChatAdapter::new(ResponsesAdapter::workflow(Arc::clone(&client)))
            }
        })
        .collect::<Vec<_>>();

    tracing::info!(
        base_url = %config.upstream_base_url,
        model = %config.model,
        workflow_endpoints = workflows.len(),
        "Upstream adapters ready"
    );

    Ok(Some(UpstreamAdapters {
        session: BoxSessionAdapter::new(ChatKitSessionAdapter::new(Arc::clone(&client))),
        completion: BoxChatAdapter::new(ResponsesAdapter::completion(client)),
        workflows,
    }))
}
