//! Document tree for the sift markup parser.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! A [`Document`] owns every node; parents own their child lists and children
//! refer back to their parent by index only.
//!
//! Nodes are read through [`NodeRef`], a cheap copyable handle that pairs a
//! [`NodeId`] with the document it belongs to.
//!
//! Nesting depth is bounded only by the input, so nothing here recurses per
//! level: subtree traversals go through [`Walk`].

mod attributes;
mod node_ref;
mod serialize;
mod walk;

pub use attributes::{Attribute, Attributes};
pub use node_ref::{ElementChildren, NodeRef};
pub use walk::{Walk, WalkEvent};

/// Elements whose subtrees are left out of flattened text.
pub const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// A type-safe index into a [`Document`].
///
/// Indices are handed out in creation order, so for a parsed document they
/// also follow document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document root is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// One entry in an element's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    /// A run of character data.
    Text(String),
    /// A nested element.
    Element(NodeId),
}

impl Child {
    /// The text of this child, if it is a text run.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    /// The element id of this child, if it is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<NodeId> {
        match self {
            Self::Element(id) => Some(*id),
            Self::Text(_) => None,
        }
    }
}

/// An element, or the synthetic document root.
#[derive(Debug, Clone)]
pub struct Node {
    tag_name: Option<String>,
    parent: Option<NodeId>,
    children: Vec<Child>,
    attributes: Attributes,
    starting_offset: u64,
}

impl Node {
    /// Tag name as written in the markup; `None` only for the root.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    /// The parent element, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Attributes in source order.
    #[must_use]
    pub const fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Character offset of the element's opening `<`.
    #[must_use]
    pub const fn starting_offset(&self) -> u64 {
        self.starting_offset
    }

    /// Case-insensitive tag comparison. Always false for the root.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tag_name
            .as_deref()
            .is_some_and(|tag| tag.eq_ignore_ascii_case(name))
    }
}

/// A parsed document: the root node, its base URL, and the node arena.
#[derive(Debug, Clone)]
pub struct Document {
    base_url: String,
    /// All nodes, indexed by [`NodeId`]. The root is always at index 0.
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document containing only the root node.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let root = Node {
            tag_name: None,
            parent: None,
            children: Vec::new(),
            attributes: Attributes::new(),
            starting_offset: 0,
        };
        Self {
            base_url: base_url.into(),
            nodes: vec![root],
        }
    }

    /// The URL the document was fetched from, as supplied by the caller.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle to the root node.
    #[must_use]
    pub const fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, NodeId::ROOT)
    }

    /// Handle to the node at `id`, if it exists.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes.get(id.0).map(|_| NodeRef::new(self, id))
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a document has at least its root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[Child] {
        self.get(id).map_or(&[], Node::children)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            document: self,
            current: self.parent(id),
        }
    }

    /// Iterate over every element below `id` in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self
            .children(id)
            .iter()
            .filter_map(Child::as_element)
            .collect();
        stack.reverse();
        Descendants {
            document: self,
            stack,
        }
    }

    /// Create an element and append it as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag_name: impl Into<String>,
        attributes: Attributes,
        starting_offset: u64,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag_name: Some(tag_name.into()),
            parent: Some(parent),
            children: Vec::new(),
            attributes,
            starting_offset,
        });
        self.nodes[parent.0].children.push(Child::Element(id));
        id
    }

    /// Append a text run as the last child of `parent`. Runs are not merged
    /// until [`Document::condense_text`] is called.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) {
        self.nodes[parent.0].children.push(Child::Text(text.into()));
    }

    /// Merge each sequence of adjacent text runs under `id` into one trimmed
    /// run, dropping runs that trim to nothing. Only characters up to and
    /// including U+0020 are trimmed.
    pub fn condense_text(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        let mut condensed = Vec::with_capacity(children.len());
        let mut pending = String::new();
        for child in children {
            match child {
                Child::Text(text) => pending.push_str(&text),
                Child::Element(element) => {
                    flush_text(&mut pending, &mut condensed);
                    condensed.push(Child::Element(element));
                }
            }
        }
        flush_text(&mut pending, &mut condensed);
        node.children = condensed;
    }
}

/// Control characters and ASCII space. Non-breaking spaces are content.
const fn is_trimmable(c: char) -> bool {
    c <= ' '
}

fn flush_text(pending: &mut String, children: &mut Vec<Child>) {
    let trimmed = pending.trim_matches(is_trimmable);
    if !trimmed.is_empty() {
        children.push(Child::Text(trimmed.to_string()));
    }
    pending.clear();
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    document: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.document.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the elements below a node.
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = self.document.children(id);
        self.stack
            .extend(children.iter().rev().filter_map(Child::as_element));
        Some(id)
    }
}
