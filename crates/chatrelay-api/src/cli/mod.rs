//! CLI command definitions for the `chatrelay` binary.

pub mod chat;
pub mod health;
pub mod serve;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chatrelay_observe::tracing_setup::LogFormat;

use self::chat::Mode;

/// Relay placeholder left in fresh deployments; the client runs in demo
/// mode until it is replaced.
pub const DEFAULT_RELAY_URL: &str = "https://chat-relay.YOUR_SUBDOMAIN.workers.dev";

/// Stateless chat relay and terminal chat client.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format (pretty or json).
    #[arg(long, global = true, env = "CHATRELAY_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Export trace spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay HTTP server.
    Serve {
        /// Host to bind to.
        #[arg(long, env = "CHATRELAY_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on.
        #[arg(short, long, env = "CHATRELAY_PORT", default_value = "8787")]
        port: u16,

        /// Optional TOML config file. The API key is only read from the
        /// environment.
        #[arg(long, env = "CHATRELAY_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Start an interactive chat session through a relay.
    Chat {
        #[command(flatten)]
        relay: RelayArgs,

        /// Workflow to route turns through.
        #[arg(long, env = "CHATRELAY_WORKFLOW_ID")]
        workflow_id: Option<String>,

        /// `manual` runs the terminal chat; `hosted` only issues a session
        /// token for an embedded widget.
        #[arg(long, value_enum, default_value = "manual")]
        mode: Mode,
    },

    /// Issue a session token for a workflow.
    Session {
        #[command(flatten)]
        relay: RelayArgs,

        /// Workflow the session is scoped to.
        #[arg(long, env = "CHATRELAY_WORKFLOW_ID")]
        workflow_id: String,
    },

    /// Check that a relay is up.
    Health {
        #[command(flatten)]
        relay: RelayArgs,
    },
}

#[derive(clap::Args)]
pub struct RelayArgs {
    /// Base URL of the relay.
    #[arg(long, env = "CHATRELAY_URL", default_value = DEFAULT_RELAY_URL)]
    pub relay_url: String,
}
