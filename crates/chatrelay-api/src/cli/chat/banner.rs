//! Welcome banner with the numbered quick prompts.

use console::style;

use chatrelay_core::client::session::QUICK_PROMPTS;
use chatrelay_types::chat::UserId;

pub fn print_welcome_banner(relay_url: &str, user_id: &UserId, demo_mode: bool) {
    println!();
    println!("  {} {}", style("💬").bold(), style("Company Assistant").cyan().bold());
    println!(
        "  {}",
        style("Ask about policies, benefits, expenses and holidays.").dim()
    );
    println!();
    println!("  {}  {}", style("Relay:").bold(), style(relay_url).dim());
    println!("  {}   {}", style("User:").bold(), style(user_id).dim());
    if demo_mode {
        println!(
            "  {}",
            style("Demo mode: the relay URL has not been configured.").yellow()
        );
    }
    println!();
    println!("  {}", style("Try one of these:").bold());
    for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
        println!("    {} {}", style(format!("/{}", i + 1)).cyan(), prompt);
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
