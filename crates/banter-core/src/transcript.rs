//! The conversation transcript and its HTML export.

use banter_types::markup::escape_html;
use banter_types::transcript::{ChatLogEntry, Sender};

/// Icon settings for exported bot entries.
#[derive(Debug, Clone)]
pub struct ExportStyle {
    pub bot_icon: String,
    pub icon_fallback_color: String,
}

/// Append-only record of the current session's entries.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<ChatLogEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ChatLogEntry) {
        self.entries.push(entry);
    }

    /// Drop every entry (restart).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ChatLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the transcript as the markup a browser chat box would hold.
    pub fn to_html(&self, style: &ExportStyle) -> String {
        let mut html = String::new();
        for entry in &self.entries {
            html.push_str(&entry_html(entry, style));
            html.push('\n');
        }
        html
    }
}

fn entry_html(entry: &ChatLogEntry, style: &ExportStyle) -> String {
    let sender = entry.sender.to_string();
    let icon = match entry.sender {
        Sender::Bot => format!(
            r#"<img src="{}" class="bot-icon" alt="Bot" onerror="this.style.backgroundColor='{}';">"#,
            escape_html(&style.bot_icon),
            css_color(&style.icon_fallback_color),
        ),
        Sender::User => String::new(),
    };
    let error_class = if entry.is_error { " error-message" } else { "" };
    format!(
        r#"<div class="message-wrapper {sender}-wrapper">{icon}<div class="message {sender}-message{error_class}">{}</div></div>"#,
        entry.content.to_html()
    )
}

/// Keep only characters that can appear in a plain CSS colour value.
fn css_color(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' '))
        .collect()
}
