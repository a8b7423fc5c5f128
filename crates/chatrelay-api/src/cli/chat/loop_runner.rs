//! Main chat loop orchestration.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use chatrelay_core::client::session::{is_placeholder_url, ChatSession, SendOutcome, QUICK_PROMPTS};
use chatrelay_infra::relay_client::RelayClient;
use chatrelay_types::chat::{Role, UserId};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer;

/// What the user asked to send.
enum Turn {
    Text(String),
    QuickPrompt(usize),
}

/// Run the interactive chat loop against the relay at `relay_url`.
pub async fn run_chat_loop(relay_url: &str, workflow_id: Option<String>) -> anyhow::Result<()> {
    let relay = RelayClient::new(relay_url)?;
    let demo_mode = is_placeholder_url(relay_url);
    let mut session = ChatSession::new(UserId::generate(), workflow_id, demo_mode);

    print_welcome_banner(relay_url, session.user_id(), demo_mode);

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let turn = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => match commands::parse(&text) {
                None => Turn::Text(text),
                Some(ChatCommand::QuickPrompt(index)) => Turn::QuickPrompt(index),
                Some(ChatCommand::Help) => {
                    commands::print_help();
                    continue;
                }
                Some(ChatCommand::Clear) => {
                    chat_input.clear();
                    continue;
                }
                Some(ChatCommand::History) => {
                    print_history(&session);
                    continue;
                }
                Some(ChatCommand::Exit) => {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
                Some(ChatCommand::Unknown(name)) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                    continue;
                }
            },
        };

        if let Turn::QuickPrompt(index) = turn {
            println!("  {} {}", style("You >").green().bold(), QUICK_PROMPTS[index]);
        }

        let spinner = typing_indicator();
        let outcome = match turn {
            Turn::Text(text) => session.send(&relay, &text).await,
            Turn::QuickPrompt(index) => session.quick_prompt(&relay, index).await,
        };
        spinner.finish_and_clear();

        print_outcome(&session, &outcome);
    }

    tracing::debug!(turns = session.transcript().len(), "Chat loop finished");
    Ok(())
}

fn typing_indicator() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("typing...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn print_outcome(session: &ChatSession, outcome: &SendOutcome) {
    if *outcome == SendOutcome::Ignored {
        return;
    }

    if let Some(last) = session.transcript().last().filter(|e| e.role == Role::Assistant) {
        println!();
        println!("  {}", style("Assistant").cyan().bold());
        println!("{}", renderer::render(&last.text));
        println!();
    }

    if let SendOutcome::Failed { toast: Some(toast) } = outcome {
        eprintln!("  {} {}", style("!").red().bold(), style(toast).red());
        println!();
    }
}

fn print_history(session: &ChatSession) {
    println!();
    if session.transcript().is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for entry in session.transcript() {
        let label = match entry.role {
            Role::User => style("You").green().bold(),
            Role::Assistant => style("Assistant").cyan().bold(),
        };
        println!(
            "  {} {} {}",
            style(entry.at.format("%H:%M")).dim(),
            label,
            entry.text
        );
    }
    println!();
}
