//! Read-only handle for querying a node.

use std::collections::HashSet;
use std::fmt;
use std::slice;

use crate::{Attributes, Child, Document, Node, NodeId, RAW_TEXT_ELEMENTS, Walk, WalkEvent};

/// A node together with the document that owns it.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) const fn new(document: &'a Document, id: NodeId) -> Self {
        Self { document, id }
    }

    /// This node's index in its document.
    #[must_use]
    pub const fn id(self) -> NodeId {
        self.id
    }

    /// The owning document.
    #[must_use]
    pub const fn document(self) -> &'a Document {
        self.document
    }

    fn node(self) -> &'a Node {
        // A NodeRef is only ever built for an id that exists in its document.
        &self.document.nodes[self.id.0]
    }

    /// Whether this is the document root.
    #[must_use]
    pub fn is_root(self) -> bool {
        self.id == NodeId::ROOT
    }

    /// Tag name as written; `None` for the root.
    #[must_use]
    pub fn tag_name(self) -> Option<&'a str> {
        self.node().tag_name()
    }

    /// Case-insensitive tag comparison.
    #[must_use]
    pub fn has_tag(self, name: &str) -> bool {
        self.node().has_tag(name)
    }

    /// Character offset of the opening `<` in the source stream.
    #[must_use]
    pub fn starting_offset(self) -> u64 {
        self.node().starting_offset()
    }

    /// The parent element, or the root for top-level elements.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.node()
            .parent()
            .map(|parent| Self::new(self.document, parent))
    }

    /// Ancestors from the parent up to and including the root.
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'a>> {
        let document = self.document;
        document
            .ancestors(self.id)
            .map(move |id| NodeRef::new(document, id))
    }

    /// Text and element children in document order.
    #[must_use]
    pub fn children(self) -> &'a [Child] {
        self.node().children()
    }

    /// Number of children, text runs included.
    #[must_use]
    pub fn child_count(self) -> usize {
        self.children().len()
    }

    /// Element children in document order.
    #[must_use]
    pub fn element_children(self) -> ElementChildren<'a> {
        ElementChildren {
            document: self.document,
            inner: self.children().iter(),
        }
    }

    /// All attributes in source order.
    #[must_use]
    pub fn attributes(self) -> &'a Attributes {
        self.node().attributes()
    }

    /// First value of the attribute `name`.
    #[must_use]
    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.attributes().get(name)
    }

    /// Every value of the attribute `name`.
    #[must_use]
    pub fn attr_all(self, name: &str) -> Vec<&'a str> {
        self.attributes().get_all(name).collect()
    }

    /// Distinct attribute names in order of first appearance.
    #[must_use]
    pub fn attr_names(self) -> Vec<&'a str> {
        self.attributes().names()
    }

    /// The `id` attribute.
    #[must_use]
    pub fn element_id(self) -> Option<&'a str> {
        self.attr("id")
    }

    /// Class names from the `class` attribute, split on whitespace.
    #[must_use]
    pub fn classes(self) -> HashSet<&'a str> {
        self.attr("class")
            .map(|list| list.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Whether this element's body is raw text (`script` or `style`).
    #[must_use]
    pub fn is_raw_text(self) -> bool {
        RAW_TEXT_ELEMENTS.iter().any(|raw| self.has_tag(raw))
    }

    /// Depth-first traversal of this subtree, starting with this node.
    #[must_use]
    pub const fn walk(self) -> Walk<'a> {
        Walk::new(self)
    }

    /// Concatenated text of this subtree, joined with single spaces.
    ///
    /// `script` and `style` descendants are skipped entirely, as are empty
    /// text runs. Called on a `script` element itself, it returns the body.
    #[must_use]
    pub fn flattened_text(self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        // Depth inside a skipped subtree; zero while collecting.
        let mut skipping = 0usize;
        for event in self.walk() {
            match event {
                WalkEvent::Enter(node) => {
                    if skipping > 0 || (node.id != self.id && node.is_raw_text()) {
                        skipping += 1;
                    }
                }
                WalkEvent::Leave(_) => skipping = skipping.saturating_sub(1),
                WalkEvent::Text(_, text) => {
                    if skipping == 0 && !text.is_empty() {
                        parts.push(text);
                    }
                }
            }
        }
        parts.join(" ")
    }

    /// Serialize this subtree as markup. The root serializes its children.
    #[must_use]
    pub fn to_html(self) -> String {
        self.to_string()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.document, other.document)
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag_name", &self.tag_name())
            .field("starting_offset", &self.starting_offset())
            .finish()
    }
}

/// Iterator over the element children of a node.
pub struct ElementChildren<'a> {
    document: &'a Document,
    inner: slice::Iter<'a, Child>,
}

impl<'a> Iterator for ElementChildren<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        self.inner
            .find_map(Child::as_element)
            .map(|id| NodeRef::new(document, id))
    }
}

impl DoubleEndedIterator for ElementChildren<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let document = self.document;
        self.inner
            .by_ref()
            .rev()
            .find_map(Child::as_element)
            .map(|id| NodeRef::new(document, id))
    }
}
