//! `chatrelay session`: issue a session token through a relay.

use console::style;

use chatrelay_core::client::api::RelayApi;
use chatrelay_infra::relay_client::RelayClient;
use chatrelay_types::chat::UserId;
use chatrelay_types::session::SessionRequest;

pub async fn issue_session(relay_url: &str, workflow_id: &str, json: bool) -> anyhow::Result<()> {
    let relay = RelayClient::new(relay_url)?;
    let user_id = UserId::generate();
    let token = relay
        .issue_session(&SessionRequest {
            workflow_id: Some(workflow_id.to_string()),
            user_id: Some(user_id.clone()),
        })
        .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "client_secret": token.client_secret,
                "user_id": user_id,
                "workflow_id": workflow_id,
            }))?
        );
    } else {
        println!();
        println!(
            "  {} Session issued for workflow {}",
            style("✓").green().bold(),
            style(workflow_id).cyan()
        );
        println!("  {}  {}", style("User:").bold(), style(&user_id).dim());
        println!(
            "  {}  {}",
            style("Client secret:").bold(),
            style(&token.client_secret).yellow()
        );
        println!();
    }
    Ok(())
}
