//! Application state shared by every request.
//!
//! Built once at startup from static configuration and never mutated
//! afterwards.

use std::path::Path;
use std::sync::Arc;

use chatrelay_core::cors::OriginPolicy;
use chatrelay_core::relay::service::RelayService;
use chatrelay_infra::config::load_relay_config;
use chatrelay_infra::upstream::build_adapters;
use chatrelay_types::config::RelayConfig;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
    pub origins: Arc<OriginPolicy>,
}

impl AppState {
    pub fn new(relay: RelayService, origins: OriginPolicy) -> Self {
        Self {
            relay: Arc::new(relay),
            origins: Arc::new(origins),
        }
    }

    /// Load configuration (file, then environment) and wire the relay.
    pub async fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = load_relay_config(config_path).await?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &RelayConfig) -> anyhow::Result<Self> {
        let adapters = build_adapters(config)?;
        Ok(Self::new(
            RelayService::new(adapters),
            OriginPolicy::from_list(&config.allowed_origins),
        ))
    }
}
