//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
///
/// Shows which backend the widget talks to and a hint about slash commands.
pub fn print_welcome_banner(backend_url: &str) {
    println!();
    println!("  {} {}", style("*").cyan(), style("Banter").cyan().bold());
    println!("  {}", style("Chat widget in your terminal").dim());
    println!();
    println!("  {}  {}", style("Backend:").bold(), style(backend_url).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
