//! Markup serialization for node subtrees.

use std::fmt::{self, Write};

use crate::{NodeRef, WalkEvent};

impl fmt::Display for NodeRef<'_> {
    /// `<tag a="v">children</tag>`, or `<tag a="v"/>` for an element with no
    /// children. The root writes only its children.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in self.walk() {
            match event {
                WalkEvent::Enter(node) => write_open(f, node)?,
                WalkEvent::Text(parent, text) if parent.is_raw_text() => f.write_str(text)?,
                WalkEvent::Text(_, text) => write_escaped(f, text, false)?,
                WalkEvent::Leave(node) => {
                    if let Some(tag) = node.tag_name()
                        && node.child_count() > 0
                    {
                        write!(f, "</{tag}>")?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_open(f: &mut fmt::Formatter<'_>, node: NodeRef<'_>) -> fmt::Result {
    let Some(tag) = node.tag_name() else {
        return Ok(());
    };
    write!(f, "<{tag}")?;
    for attr in node.attributes() {
        write!(f, " {}=\"", attr.name)?;
        write_escaped(f, &attr.value, true)?;
        f.write_char('"')?;
    }
    if node.child_count() == 0 {
        f.write_str("/>")
    } else {
        f.write_char('>')
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, in_attribute: bool) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' if in_attribute => f.write_str("&quot;")?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}
