//! Minimal inline markup for rendered messages.
//!
//! Blank lines separate paragraphs, single newlines are line breaks,
//! `**text**` is bold and `*text*` is italic. Nothing else is interpreted;
//! an unmatched delimiter stays literal.

/// An inline run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
}

/// A paragraph made of lines, each a sequence of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub lines: Vec<Vec<Span>>,
}

/// Split `text` into paragraphs, lines and spans.
pub fn parse(text: &str) -> Vec<Paragraph> {
    text.split("\n\n")
        .map(|para| Paragraph {
            lines: para.split('\n').map(parse_line).collect(),
        })
        .collect()
}

fn parse_line(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while let Some(pos) = rest.find('*') {
        plain.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let (span, consumed) = if let Some(inner) = delimited(tail, "**") {
            (Span::Bold(inner.to_string()), inner.len() + 4)
        } else if let Some(inner) = delimited(tail, "*") {
            (Span::Italic(inner.to_string()), inner.len() + 2)
        } else {
            plain.push('*');
            rest = &tail[1..];
            continue;
        };

        if !plain.is_empty() {
            spans.push(Span::Text(std::mem::take(&mut plain)));
        }
        spans.push(span);
        rest = &tail[consumed..];
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        spans.push(Span::Text(plain));
    }
    spans
}

/// Inner text of `delim inner delim` at the start of `s`.
fn delimited<'a>(s: &'a str, delim: &str) -> Option<&'a str> {
    let body = s.strip_prefix(delim)?;
    let end = body.find(delim)?;
    Some(&body[..end])
}

/// Render `text` as HTML, escaping it before wrapping.
pub fn to_html(text: &str) -> String {
    let mut html = String::with_capacity(text.len() + 16);
    for para in parse(text) {
        html.push_str("<p>");
        for (i, line) in para.lines.iter().enumerate() {
            if i > 0 {
                html.push_str("<br>");
            }
            for span in line {
                match span {
                    Span::Text(t) => html.push_str(&escape_html(t)),
                    Span::Bold(t) => {
                        html.push_str("<strong>");
                        html.push_str(&escape_html(t));
                        html.push_str("</strong>");
                    }
                    Span::Italic(t) => {
                        html.push_str("<em>");
                        html.push_str(&escape_html(t));
                        html.push_str("</em>");
                    }
                }
            }
        }
        html.push_str("</p>");
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
