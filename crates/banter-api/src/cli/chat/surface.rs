//! Terminal rendering of the chat widget.
//!
//! `TerminalSurface` implements the `ChatSurface` port: entries are written
//! as styled lines (strong spans in bold, bullets with their glyph), the
//! typing indicator is an `indicatif` spinner, and choice rows are printed
//! numbered so they can be picked by number or label.

use std::io::Write;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use banter_core::surface::ChatSurface;
use banter_types::input::{EntryDiscipline, InputConfig};
use banter_types::markup::{BULLET_GLYPH, MarkupLine, RichText};
use banter_types::transcript::{ChatLogEntry, Sender};
use banter_types::turn::ChoiceButton;

const BOT_LABEL: &str = "Bot";
const USER_LABEL: &str = "You";

/// Draws the conversation on a terminal writer.
pub struct TerminalSurface<W: Write> {
    out: W,
    typing: Option<ProgressBar>,
    draw_spinner: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            typing: None,
            draw_spinner: true,
        }
    }

    /// A surface whose typing indicator is never drawn.
    pub fn without_spinner(out: W) -> Self {
        Self {
            out,
            typing: None,
            draw_spinner: false,
        }
    }

    /// Write a dim notice line (command feedback, hints).
    pub fn notice(&mut self, text: &str) {
        let _ = writeln!(self.out, "  {}", style(text).dim());
    }

    /// Write pre-rendered text as is.
    pub fn write_raw(&mut self, text: &str) {
        let _ = write!(self.out, "{text}");
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn spinner(&self) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        if !self.draw_spinner {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message("typing...");
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }
}

impl<W: Write> ChatSurface for TerminalSurface<W> {
    fn show_typing(&mut self) {
        if self.typing.is_none() {
            self.typing = Some(self.spinner());
        }
    }

    fn hide_typing(&mut self) {
        if let Some(bar) = self.typing.take() {
            bar.finish_and_clear();
        }
    }

    fn append(&mut self, entry: &ChatLogEntry) {
        let _ = write!(self.out, "{}", render_entry(entry));
        let _ = self.out.flush();
    }

    fn clear(&mut self) {
        self.hide_typing();
        let _ = write!(self.out, "\n  {}\n\n", style("--- conversation restarted ---").dim());
    }

    fn configure_input(&mut self, config: &InputConfig) {
        let text = match config {
            InputConfig::Entry {
                discipline,
                placeholder,
            } => {
                let hint = match discipline {
                    EntryDiscipline::Text => placeholder.clone(),
                    EntryDiscipline::Tel => format!("{placeholder} (phone number)"),
                };
                format!("  {}\n", style(hint).dim())
            }
            InputConfig::Choices { buttons } => render_choices(buttons),
            InputConfig::Hidden => return,
        };
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        self.hide_typing();
    }
}

/// Render one entry as terminal lines, preceded by a blank line.
pub fn render_entry(entry: &ChatLogEntry) -> String {
    let label = match entry.sender {
        Sender::Bot => style(BOT_LABEL).cyan().bold(),
        Sender::User => style(USER_LABEL).green().bold(),
    };
    let indent = " ".repeat(BOT_LABEL.len().max(USER_LABEL.len()) + 3);

    let mut out = String::new();
    for (i, line) in render_rich_text(&entry.content, entry.is_error).iter().enumerate() {
        if i == 0 {
            out.push_str(&format!("\n  {label} {line}\n"));
        } else {
            out.push_str(&format!("{indent}{line}\n"));
        }
    }
    if out.is_empty() {
        out.push_str(&format!("\n  {label}\n"));
    }
    out
}

/// Style each markup line for the terminal.
pub fn render_rich_text(text: &RichText, is_error: bool) -> Vec<String> {
    text.lines
        .iter()
        .map(|line| {
            let body = render_line(line);
            if is_error {
                style(body).red().to_string()
            } else {
                body
            }
        })
        .collect()
}

fn render_line(line: &MarkupLine) -> String {
    let mut out = String::new();
    if line.bullet {
        out.push_str(BULLET_GLYPH);
        out.push(' ');
    }
    for span in &line.spans {
        if span.strong {
            out.push_str(&style(&span.text).bold().to_string());
        } else {
            out.push_str(&span.text);
        }
    }
    out
}

/// Numbered choice list, one per line.
pub fn render_choices(buttons: &[ChoiceButton]) -> String {
    let mut out = String::new();
    for (i, button) in buttons.iter().enumerate() {
        out.push_str(&format!(
            "    {} {}\n",
            style(format!("[{}]", i + 1)).cyan(),
            button.label
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::markdown;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).to_string()
    }

    fn surface() -> TerminalSurface<Vec<u8>> {
        TerminalSurface::without_spinner(Vec::new())
    }

    fn output(surface: &TerminalSurface<Vec<u8>>) -> String {
        plain(&String::from_utf8_lossy(surface.writer()))
    }

    #[test]
    fn test_bot_entry_renders_bullets_and_breaks() {
        let entry = ChatLogEntry::new(
            Sender::Bot,
            markdown::render("**Hi**\n- one\n- two"),
        );
        assert_eq!(
            plain(&render_entry(&entry)),
            "\n  Bot Hi\n      \u{2022} one\n      \u{2022} two\n"
        );
    }

    #[test]
    fn test_user_entry_keeps_text_verbatim() {
        let entry = ChatLogEntry::new(Sender::User, markdown::render("<b>Mallory</b>"));
        assert_eq!(plain(&render_entry(&entry)), "\n  You <b>Mallory</b>\n");
    }

    #[test]
    fn test_choices_are_numbered() {
        let buttons = vec![
            ChoiceButton::new("flow_schools", "Explore Schools & Courses"),
            ChoiceButton::new("restart", "Start Over"),
        ];
        assert_eq!(
            plain(&render_choices(&buttons)),
            "    [1] Explore Schools & Courses\n    [2] Start Over\n"
        );
    }

    #[test]
    fn test_configure_input_prints_hint_or_choices() {
        let mut s = surface();
        s.configure_input(&InputConfig::Entry {
            discipline: EntryDiscipline::Tel,
            placeholder: "Mobile number".to_string(),
        });
        s.configure_input(&InputConfig::Hidden);
        s.configure_input(&InputConfig::Choices {
            buttons: vec![ChoiceButton::new("a", "Alpha")],
        });
        assert_eq!(output(&s), "  Mobile number (phone number)\n    [1] Alpha\n");
    }

    #[test]
    fn test_typing_indicator_toggles() {
        let mut s = surface();
        s.show_typing();
        s.show_typing();
        assert!(s.typing.is_some());
        s.hide_typing();
        assert!(s.typing.is_none());
        // Hiding twice is harmless.
        s.hide_typing();
    }

    #[test]
    fn test_clear_writes_separator() {
        let mut s = surface();
        s.append(&ChatLogEntry::new(Sender::Bot, markdown::render("old")));
        s.clear();
        assert!(output(&s).ends_with("--- conversation restarted ---\n\n"));
    }
}
