//! JSON rendering of documents and matches.
//!
//! Output is streamed while walking the tree, so nesting depth costs heap,
//! not stack. Leaf values go through `serde_json` for escaping.

use serde::Serialize;
use sift_dom::{NodeRef, WalkEvent};

/// Attributes stay a list so repeated names survive.
#[derive(Debug, Serialize)]
struct JsonAttribute<'a> {
    name: &'a str,
    value: &'a str,
}

/// Pretty-printing writer with two-space indentation.
#[derive(Default)]
struct JsonWriter {
    out: String,
    /// One entry per open object or array: whether it is still empty.
    empty: Vec<bool>,
}

impl JsonWriter {
    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.empty.len() {
            self.out.push_str("  ");
        }
    }

    /// Separate a new member or element from the previous one.
    fn item(&mut self) {
        if let Some(empty) = self.empty.last_mut() {
            let first = *empty;
            *empty = false;
            if !first {
                self.out.push(',');
            }
            self.newline();
        }
    }

    fn open(&mut self, bracket: char) {
        self.out.push(bracket);
        self.empty.push(true);
    }

    fn close(&mut self, bracket: char) {
        let was_empty = self.empty.pop().unwrap_or(true);
        if !was_empty {
            self.newline();
        }
        self.out.push(bracket);
    }

    fn key(&mut self, key: &str) -> serde_json::Result<()> {
        self.item();
        self.out.push_str(&serde_json::to_string(key)?);
        self.out.push_str(": ");
        Ok(())
    }

    fn field(&mut self, key: &str, value: &impl Serialize) -> serde_json::Result<()> {
        self.key(key)?;
        self.out.push_str(&serde_json::to_string(value)?);
        Ok(())
    }

    fn node(&mut self, node: NodeRef<'_>) -> serde_json::Result<()> {
        for event in node.walk() {
            match event {
                WalkEvent::Enter(node) => self.enter(node)?,
                WalkEvent::Text(_, text) => {
                    self.item();
                    self.open('{');
                    self.field("type", &"text")?;
                    self.field("content", &text)?;
                    self.close('}');
                }
                WalkEvent::Leave(node) => {
                    if has_children_array(node) {
                        self.close(']');
                        self.close('}');
                    }
                }
            }
        }
        Ok(())
    }

    fn enter(&mut self, node: NodeRef<'_>) -> serde_json::Result<()> {
        self.item();
        self.open('{');
        match node.tag_name() {
            None => {
                self.field("type", &"document")?;
                self.field("baseUrl", &node.document().base_url())?;
            }
            Some(tag) => {
                let attributes: Vec<JsonAttribute<'_>> = node
                    .attributes()
                    .iter()
                    .map(|attr| JsonAttribute {
                        name: &attr.name,
                        value: &attr.value,
                    })
                    .collect();
                self.field("type", &"element")?;
                self.field("tagName", &tag)?;
                self.field("attributes", &attributes)?;
                self.field("startingOffset", &node.starting_offset())?;
            }
        }
        if has_children_array(node) {
            self.key("children")?;
            self.open('[');
        } else {
            self.close('}');
        }
        Ok(())
    }
}

/// The document always lists its children; elements only when they have any.
fn has_children_array(node: NodeRef<'_>) -> bool {
    node.is_root() || node.child_count() > 0
}

/// One node and its subtree as pretty-printed JSON.
///
/// # Errors
///
/// Fails only if serialization itself fails.
pub fn render_node(node: NodeRef<'_>) -> serde_json::Result<String> {
    let mut writer = JsonWriter::default();
    writer.node(node)?;
    Ok(writer.out)
}

/// A list of matches as a pretty-printed JSON array.
///
/// # Errors
///
/// Fails only if serialization itself fails.
pub fn render_matches(nodes: &[NodeRef<'_>]) -> serde_json::Result<String> {
    let mut writer = JsonWriter::default();
    writer.open('[');
    for node in nodes {
        writer.node(*node)?;
    }
    writer.close(']');
    Ok(writer.out)
}
