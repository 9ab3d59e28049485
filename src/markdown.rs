//! Markdown-subset rendering for chat replies.
//!
//! Supports bold, italic, list items and line breaks. The renderer is an
//! ordered pipeline of pure text substitutions producing an HTML fragment.
//! Input HTML passes through verbatim (no escaping), and `render` is not
//! idempotent: feeding its output back in can wrap lists a second time.
//!
//! Known quirks, kept on purpose:
//! - numbered and bulleted items both become `<li>` inside a single `<ul>`
//! - newlines become `<br>` before list wrapping, so `<br>` artifacts
//!   survive inside the list container
//! - no nested lists

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

static STRONG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*|_(.*?)_").unwrap());
static BULLET_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^- (.*)$").unwrap());
static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\d+\. (.*)$").unwrap());
static LIST_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<li>.*</li>").unwrap());

struct Step {
    name: &'static str,
    apply: fn(&str) -> String,
}

/// Substitution pipeline, applied in order. Order matters: line breaks run
/// after list-item extraction and before list wrapping.
const PIPELINE: [Step; 6] = [
    Step { name: "strong", apply: strong },
    Step { name: "emphasis", apply: emphasis },
    Step { name: "bullet_items", apply: bullet_items },
    Step { name: "numbered_items", apply: numbered_items },
    Step { name: "line_breaks", apply: line_breaks },
    Step { name: "list_wrap", apply: list_wrap },
];

/// Renders a reply through the substitution pipeline into an HTML fragment.
pub fn render(text: &str) -> String {
    let mut rendered = text.to_string();
    for step in &PIPELINE {
        rendered = (step.apply)(&rendered);
        trace!(step = step.name, "applied substitution");
    }
    rendered
}

/// `**text**` to `<strong>text</strong>`, non-greedy, within a line.
fn strong(text: &str) -> String {
    STRONG.replace_all(text, "<strong>$1</strong>").into_owned()
}

/// `*text*` or `_text_` to `<em>text</em>`, non-greedy, within a line.
fn emphasis(text: &str) -> String {
    EMPHASIS
        .replace_all(text, |caps: &Captures| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!("<em>{}</em>", inner)
        })
        .into_owned()
}

/// Line-leading `- ` to a list item. The marker is consumed.
fn bullet_items(text: &str) -> String {
    BULLET_ITEM.replace_all(text, "<li>$1</li>").into_owned()
}

/// Line-leading `1. `, `2. `, ... to a list item, same markup as bullets.
fn numbered_items(text: &str) -> String {
    NUMBERED_ITEM.replace_all(text, "<li>$1</li>").into_owned()
}

fn line_breaks(text: &str) -> String {
    text.replace('\n', "<br>")
}

/// Wraps the greedy run from the first `<li>` to the last `</li>` in one
/// `<ul>` container. Runs last, so any `<br>` between items stays inside.
fn list_wrap(text: &str) -> String {
    LIST_RUN.replace_all(text, "<ul>${0}</ul>").into_owned()
}
