//! Coloured outline of a document subtree.

use std::fmt::Write;

use owo_colors::OwoColorize;
use sift_dom::{NodeRef, WalkEvent};

const TEXT_PREVIEW: usize = 60;

/// Render `node` and its subtree, one line per node, two spaces per level.
pub fn render(node: NodeRef<'_>) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for event in node.walk() {
        match event {
            WalkEvent::Enter(node) => {
                write_open(&mut out, node, depth);
                depth += 1;
            }
            WalkEvent::Text(_, text) => {
                let indent = "  ".repeat(depth);
                let _ = writeln!(out, "{indent}\"{}\"", preview(text));
            }
            WalkEvent::Leave(_) => depth = depth.saturating_sub(1),
        }
    }
    out
}

fn write_open(out: &mut String, node: NodeRef<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    match node.tag_name() {
        None => {
            let base_url = node.document().base_url();
            let _ = writeln!(out, "{indent}{} {}", "#document".bold(), base_url.dimmed());
        }
        Some(tag) => {
            let _ = write!(out, "{indent}<{}", tag.cyan());
            for attr in node.attributes() {
                let _ = write!(out, " {}=\"{}\"", attr.name.yellow(), attr.value.green());
            }
            let _ = writeln!(out, "> {}", format!("@{}", node.starting_offset()).dimmed());
        }
    }
}

/// Newlines escaped, long runs cut to a fixed number of characters.
fn preview(text: &str) -> String {
    let escaped = text.replace('\n', "\\n");
    if escaped.chars().count() > TEXT_PREVIEW {
        let cut: String = escaped.chars().take(TEXT_PREVIEW).collect();
        format!("{cut}...")
    } else {
        escaped
    }
}
