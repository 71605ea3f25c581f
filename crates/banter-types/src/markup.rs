//! Structured display markup produced by the markdown-lite renderer.
//!
//! `RichText` keeps text and emphasis apart, so turning it into HTML escapes
//! every piece of user- or bot-supplied text before any tag is emitted.

use serde::{Deserialize, Serialize};

/// Glyph placed in front of a bullet line.
pub const BULLET_GLYPH: &str = "\u{2022}";

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default)]
    pub strong: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strong: false,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strong: true,
        }
    }
}

/// One display line. Lines are separated by line breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupLine {
    #[serde(default)]
    pub bullet: bool,
    pub spans: Vec<Span>,
}

/// Rendered markup for one transcript entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    pub lines: Vec<MarkupLine>,
}

impl RichText {
    /// Render as HTML: `<strong>` for emphasis, `<br>` between lines,
    /// a bullet glyph in front of list lines. All text is entity-escaped.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                html.push_str("<br>");
            }
            if line.bullet {
                html.push_str(BULLET_GLYPH);
                html.push(' ');
            }
            for span in &line.spans {
                if span.strong {
                    html.push_str("<strong>");
                    html.push_str(&escape_html(&span.text));
                    html.push_str("</strong>");
                } else {
                    html.push_str(&escape_html(&span.text));
                }
            }
        }
        html
    }

    /// The text without any emphasis, lines joined by `\n`.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                let body: String = line.spans.iter().map(|s| s.text.as_str()).collect();
                if line.bullet {
                    format!("{BULLET_GLYPH} {body}")
                } else {
                    body
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.spans.iter().all(|s| s.text.is_empty()))
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
