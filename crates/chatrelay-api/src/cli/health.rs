//! `chatrelay health`: probe a relay's `/health` route.

use console::style;

use chatrelay_core::client::api::RelayApi;
use chatrelay_infra::relay_client::RelayClient;

pub async fn check_health(relay_url: &str, json: bool) -> anyhow::Result<()> {
    let relay = RelayClient::new(relay_url)?;
    let result = relay.health().await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "relay_url": relay_url,
                "healthy": result.is_ok(),
                "error": result.as_ref().err().map(ToString::to_string),
            }))?
        );
    } else {
        match &result {
            Ok(()) => println!("  {} {} is healthy", style("✓").green(), style(relay_url).cyan()),
            Err(e) => println!("  {} {}: {e}", style("✗").red(), style(relay_url).cyan()),
        }
    }

    result.map_err(Into::into)
}
