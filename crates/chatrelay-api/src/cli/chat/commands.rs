//! Slash command parsing for the chat loop.

use console::style;

use chatrelay_core::client::session::QUICK_PROMPTS;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    Clear,
    Exit,
    /// Show the transcript so far.
    History,
    /// Send quick prompt N (zero-based).
    QuickPrompt(usize),
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    let cmd = trimmed.strip_prefix('/')?.to_lowercase();

    if let Ok(n) = cmd.parse::<usize>() {
        return Some(match n {
            1..=4 if n <= QUICK_PROMPTS.len() => ChatCommand::QuickPrompt(n - 1),
            _ => ChatCommand::Unknown(trimmed.to_string()),
        });
    }

    match cmd.as_str() {
        "help" | "h" | "?" => Some(ChatCommand::Help),
        "clear" | "cls" => Some(ChatCommand::Clear),
        "exit" | "quit" | "q" => Some(ChatCommand::Exit),
        "history" => Some(ChatCommand::History),
        _ => Some(ChatCommand::Unknown(trimmed.to_string())),
    }
}

pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     {}", style("/1../4").cyan(), "Send a quick prompt");
    println!("  {}    {}", style("/help").cyan(), "Show this help message");
    println!("  {}   {}", style("/clear").cyan(), "Clear the screen");
    println!("  {} {}", style("/history").cyan(), "Show the conversation so far");
    println!("  {}    {}", style("/exit").cyan(), "End the chat session");
    println!();
}
