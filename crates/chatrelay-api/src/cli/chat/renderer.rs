//! Terminal rendering of assistant replies.
//!
//! Replies go through the same markup rules as the web client
//! (`**bold**`, `*italic*`, paragraphs and line breaks), styled with
//! `console` instead of HTML.

use console::style;

use chatrelay_core::client::markup::{self, Span};

const INDENT: &str = "  ";

/// Render `text` for the terminal, indented to match the chat layout.
pub fn render(text: &str) -> String {
    markup::parse(text)
        .iter()
        .map(|para| {
            para.lines
                .iter()
                .map(|line| format!("{INDENT}{}", render_spans(line)))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(text) => text.clone(),
            Span::Bold(text) => style(text).bold().to_string(),
            Span::Italic(text) => style(text).italic().to_string(),
        })
        .collect()
}
