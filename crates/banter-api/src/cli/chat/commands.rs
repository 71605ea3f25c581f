//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and give in-chat controls that never reach the
//! backend as messages.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Restart the conversation with the backend.
    Restart,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/restart" | "/new" => Some(ChatCommand::Restart),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// The help text listing all available commands.
pub fn help_text() -> String {
    let rows = [
        ("/help", "Show this help message"),
        ("/restart", "Start the conversation over"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat session"),
    ];

    let mut out = format!("\n  {}\n\n", style("Available commands:").bold());
    for (cmd, what) in rows {
        out.push_str(&format!("  {:<10} {}\n", style(cmd).cyan(), what));
    }
    out.push_str(&format!(
        "\n  {}\n  {}\n",
        style("When choices are shown, type a number or the choice's label.").dim(),
        style("Ctrl+D to exit, Ctrl+C keeps the conversation.").dim()
    ));
    out
}
