//! Relay configuration loader.
//!
//! Reads an optional TOML file into [`RelayConfig`], then applies
//! environment overrides. The upstream credential only ever comes from the
//! environment.

use std::path::Path;

use secrecy::SecretString;

use chatrelay_types::config::{RelayConfig, WorkflowEndpoint};
use chatrelay_types::error::ConfigError;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
pub const ENV_UPSTREAM_BASE_URL: &str = "CHATRELAY_UPSTREAM_BASE_URL";
pub const ENV_MODEL: &str = "CHATRELAY_MODEL";
pub const ENV_WORKFLOW_ENDPOINTS: &str = "CHATRELAY_WORKFLOW_ENDPOINTS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CHATRELAY_REQUEST_TIMEOUT_SECS";

/// Load relay configuration.
///
/// - `path` of `None` starts from [`RelayConfig::default()`].
/// - A named file that cannot be read or parsed is an error; a broken
///   config should stop the server rather than silently run on defaults.
/// - Process environment overrides are applied last.
pub async fn load_relay_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path).await?,
        None => {
            tracing::debug!("No config file given, using defaults");
            RelayConfig::default()
        }
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

async fn read_config_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let config = toml::from_str::<RelayConfig>(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!("Loaded relay config from {}", path.display());
    Ok(config)
}

/// Apply environment overrides from `lookup` onto `config`.
///
/// Blank values count as unset.
pub fn apply_env(
    config: &mut RelayConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get(ENV_API_KEY) {
        config.api_key = Some(SecretString::from(key.trim().to_string()));
    }
    if let Some(origins) = get(ENV_ALLOWED_ORIGINS) {
        config.allowed_origins = origins;
    }
    if let Some(base_url) = get(ENV_UPSTREAM_BASE_URL) {
        config.upstream_base_url = base_url.trim().to_string();
    }
    if let Some(model) = get(ENV_MODEL) {
        config.model = model.trim().to_string();
    }
    if let Some(endpoints) = get(ENV_WORKFLOW_ENDPOINTS) {
        config.workflow_endpoints = parse_workflow_endpoints(&endpoints)?;
    }
    if let Some(secs) = get(ENV_REQUEST_TIMEOUT_SECS) {
        let secs = secs.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
            key: ENV_REQUEST_TIMEOUT_SECS.to_string(),
            message: e.to_string(),
        })?;
        config.request_timeout_secs = Some(secs);
    }

    Ok(())
}

/// Parse a comma-separated endpoint list, keeping order.
pub fn parse_workflow_endpoints(raw: &str) -> Result<Vec<WorkflowEndpoint>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<WorkflowEndpoint>().map_err(|message| ConfigError::Invalid {
                key: ENV_WORKFLOW_ENDPOINTS.to_string(),
                message,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_relay_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("relay.toml");
        tokio::fs::write(
            &path,
            r#"
allowed_origins = "https://docs.example.com"
model = "gpt-4o-mini"
workflow_endpoints = ["responses_workflow"]
request_timeout_secs = 20
"#,
        )
        .await
        .unwrap();

        let config = read_config_file(&path).await.unwrap();
        assert_eq!(config.allowed_origins, "https://docs.example.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(
            config.workflow_endpoints,
            vec![WorkflowEndpoint::ResponsesWorkflow]
        );
        assert_eq!(config.request_timeout_secs, Some(20));
        assert!(config.api_key.is_none());
    }

    #[tokio::test]
    async fn load_relay_config_invalid_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("relay.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = read_config_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn load_relay_config_missing_named_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_relay_config(Some(&tmp.path().join("absent.toml")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn apply_env_overrides_file_values() {
        let mut config = RelayConfig::default();
        apply_env(
            &mut config,
            env(&[
                (ENV_API_KEY, "sk-live"),
                (ENV_ALLOWED_ORIGINS, "https://a.example,null"),
                (ENV_UPSTREAM_BASE_URL, "http://localhost:9000/v1"),
                (ENV_MODEL, "gpt-4.1"),
                (ENV_WORKFLOW_ENDPOINTS, "responses_workflow, chatkit_messages"),
                (ENV_REQUEST_TIMEOUT_SECS, "15"),
            ]),
        )
        .unwrap();

        assert_eq!(
            config.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("sk-live".to_string())
        );
        assert_eq!(config.allowed_origins, "https://a.example,null");
        assert_eq!(config.upstream_base_url, "http://localhost:9000/v1");
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(
            config.workflow_endpoints,
            vec![
                WorkflowEndpoint::ResponsesWorkflow,
                WorkflowEndpoint::ChatkitMessages
            ]
        );
        assert_eq!(config.request_timeout_secs, Some(15));
    }

    #[test]
    fn apply_env_blank_key_counts_as_absent() {
        let mut config = RelayConfig::default();
        apply_env(&mut config, env(&[(ENV_API_KEY, "   ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn apply_env_without_vars_keeps_defaults() {
        let mut config = RelayConfig::default();
        apply_env(&mut config, env(&[])).unwrap();
        assert_eq!(config.allowed_origins, "*");
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn apply_env_rejects_unknown_endpoint() {
        let mut config = RelayConfig::default();
        let err = apply_env(&mut config, env(&[(ENV_WORKFLOW_ENDPOINTS, "assistants")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn apply_env_rejects_bad_timeout() {
        let mut config = RelayConfig::default();
        let err =
            apply_env(&mut config, env(&[(ENV_REQUEST_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
