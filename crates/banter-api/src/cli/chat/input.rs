//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` to provide async line reading with
//! proper handling of EOF (Ctrl+D) and interrupt (Ctrl+C) signals, and maps
//! the widget's input configuration onto the prompt.

use console::style;
use rustyline_async::{Readline, ReadlineError, SharedWriter};

use banter_types::input::{EntryDiscipline, InputConfig};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line.
    Line(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Readline,
    prompt: String,
}

impl ChatInput {
    /// Create a new chat input handler with the given initial prompt.
    ///
    /// Returns the input handler and a `SharedWriter` that can be used to
    /// print output without interfering with the readline prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt.clone())?;
        Ok((Self { rl, prompt }, stdout))
    }

    /// Show `prompt`, unless it is already showing.
    pub fn set_prompt(&mut self, prompt: String) {
        if prompt != self.prompt {
            let _ = self.rl.update_prompt(&prompt);
            self.prompt = prompt;
        }
    }

    /// Read a line of input.
    ///
    /// Cancel safe: dropping the future keeps any partially typed line.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(rustyline_async::ReadlineEvent::Line(line)) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    self.rl.add_history_entry(trimmed.clone());
                }
                InputEvent::Line(trimmed)
            }
            Ok(rustyline_async::ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(rustyline_async::ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    /// Restore the terminal before exit.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}

/// Prompt text for the active input configuration.
pub fn prompt_for(config: &InputConfig) -> String {
    match config {
        InputConfig::Entry {
            discipline: EntryDiscipline::Text,
            ..
        } => format!("  {} ", style("You >").green().bold()),
        InputConfig::Entry {
            discipline: EntryDiscipline::Tel,
            ..
        } => format!("  {} ", style("Phone >").green().bold()),
        InputConfig::Choices { .. } => format!("  {} ", style("Choose >").green().bold()),
        InputConfig::Hidden => format!("  {} ", style("...").dim()),
    }
}
