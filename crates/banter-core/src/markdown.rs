//! Markdown-lite renderer.
//!
//! Supports exactly three constructs:
//! - `**x**` renders `x` with strong emphasis
//! - a line beginning with `- ` becomes a bullet line
//! - `\n` is a line break
//!
//! The output is a [`RichText`], so text is escaped when it becomes HTML and
//! no input can inject markup. User and bot text go through the same path.

use std::sync::LazyLock;

use regex::Regex;

use banter_types::markup::{MarkupLine, RichText, Span};

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("strong pattern is valid"));

const BULLET_PREFIX: &str = "- ";

/// Render restricted markdown into structured markup.
pub fn render(text: &str) -> RichText {
    RichText {
        lines: text.split('\n').map(render_line).collect(),
    }
}

fn render_line(line: &str) -> MarkupLine {
    let (bullet, body) = match line.strip_prefix(BULLET_PREFIX) {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    MarkupLine {
        bullet,
        spans: render_spans(body),
    }
}

fn render_spans(body: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for caps in STRONG.captures_iter(body) {
        let whole = caps.get(0).expect("group 0 always participates");
        if whole.start() > cursor {
            spans.push(Span::plain(&body[cursor..whole.start()]));
        }
        let inner = caps.get(1).map_or("", |m| m.as_str());
        if !inner.is_empty() {
            spans.push(Span::strong(inner));
        }
        cursor = whole.end();
    }
    if cursor < body.len() {
        spans.push(Span::plain(&body[cursor..]));
    }
    spans
}

/// Render straight to HTML.
pub fn render_html(text: &str) -> String {
    render(text).to_html()
}
