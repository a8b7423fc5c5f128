//! Chat relay server and terminal client entry point.
//!
//! Binary name: `chatrelay`

mod cli;
mod http;
mod state;

use clap::Parser;

use chatrelay_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::chat::Mode;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The server logs requests at info by default; client commands stay
    // quiet unless asked.
    let serving = matches!(cli.command, Commands::Serve { .. });
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if serving => "info",
        0 => "warn",
        1 => "info,chatrelay=debug,tower_http=debug",
        _ => "trace",
    };
    init_tracing(cli.log_format, filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        Commands::Serve { host, port, config } => {
            cli::serve::serve(&host, port, config.as_deref(), cli.quiet).await
        }
        Commands::Chat {
            relay,
            workflow_id,
            mode: Mode::Manual,
        } => cli::chat::loop_runner::run_chat_loop(&relay.relay_url, workflow_id).await,
        Commands::Chat {
            relay,
            workflow_id,
            mode: Mode::Hosted,
        } => match workflow_id {
            Some(workflow_id) => {
                cli::session::issue_session(&relay.relay_url, &workflow_id, cli.json).await
            }
            None => Err(anyhow::anyhow!("--workflow-id is required in hosted mode")),
        },
        Commands::Session { relay, workflow_id } => {
            cli::session::issue_session(&relay.relay_url, &workflow_id, cli.json).await
        }
        Commands::Health { relay } => cli::health::check_health(&relay.relay_url, cli.json).await,
    };

    shutdown_tracing();
    result
}
