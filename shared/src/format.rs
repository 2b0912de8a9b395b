//! HTML rendering of model summaries.

use std::fmt;
use std::str::FromStr;

/// How the summary is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Escaped HTML rendered on the server.
    #[default]
    Html,
    /// The model's raw text.
    Text,
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(ResponseFormat::Html),
            "text" | "raw" => Ok(ResponseFormat::Text),
            other => Err(format!("unknown response format '{}'", other)),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::Html => write!(f, "html"),
            ResponseFormat::Text => write!(f, "text"),
        }
    }
}

const CONTAINER_STYLE: &str =
    "font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px;";

/// Escape text for HTML without double-escaping entities already present.
pub fn escape(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);
    html_escape::encode_quoted_attribute(&decoded).into_owned()
}

/// Render a summary as an HTML block.
///
/// Paragraphs are separated by blank lines. A final paragraph with bullet
/// lines becomes a list; any plain lines before its first bullet become a
/// heading.
pub fn format_summary_html(summary: &str) -> String {
    let paragraphs = split_paragraphs(summary);
    let last = paragraphs.len().saturating_sub(1);

    let mut body = String::new();
    for (index, paragraph) in paragraphs.iter().enumerate() {
        if index == last && is_bullet_block(paragraph) {
            render_bullets(paragraph, &mut body);
        } else {
            let lines: Vec<String> = paragraph.lines().map(|l| escape(l.trim())).collect();
            body.push_str("<p>");
            body.push_str(&lines.join("<br>"));
            body.push_str("</p>");
        }
    }

    format!(
        "<div class=\"video-summary\" style=\"{}\"><h2 style=\"color: #2c3e50;\">Video Summary</h2>{}</div>",
        CONTAINER_STYLE, body
    )
}

fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

fn bullet_content(line: &str) -> Option<&str> {
    let line = line.trim_start();
    ['•', '-']
        .iter()
        .find_map(|marker| line.strip_prefix(*marker))
        .map(str::trim)
}

fn is_bullet_block(paragraph: &str) -> bool {
    paragraph.lines().any(|line| bullet_content(line).is_some())
}

fn render_bullets(paragraph: &str, out: &mut String) {
    let mut heading: Vec<&str> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    for line in paragraph.lines() {
        match bullet_content(line) {
            Some(content) => items.push(content.to_string()),
            None => match items.last_mut() {
                Some(item) => {
                    item.push(' ');
                    item.push_str(line.trim());
                }
                None => heading.push(line.trim()),
            },
        }
    }

    if !heading.is_empty() {
        out.push_str("<h3>");
        out.push_str(&escape(&heading.join(" ")));
        out.push_str("</h3>");
    }

    out.push_str("<ul>");
    for item in items.iter().filter(|i| !i.is_empty()) {
        out.push_str("<li>");
        out.push_str(&escape(item));
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}
