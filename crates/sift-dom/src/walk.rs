//! Depth-first traversal without recursion.

use std::slice;

use crate::{Child, NodeRef};

/// One step of a [`Walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent<'a> {
    /// An element (or the root) is entered, before any of its children.
    Enter(NodeRef<'a>),
    /// A text run, together with the element that holds it.
    Text(NodeRef<'a>, &'a str),
    /// An element is left, after all of its children.
    Leave(NodeRef<'a>),
}

/// Depth-first, document-order traversal of a subtree.
///
/// Every `Enter` is paired with a `Leave`. The walk keeps its own stack, so
/// arbitrarily deep documents are safe to traverse.
pub struct Walk<'a> {
    start: Option<NodeRef<'a>>,
    stack: Vec<(NodeRef<'a>, slice::Iter<'a, Child>)>,
}

impl<'a> Walk<'a> {
    pub(crate) const fn new(start: NodeRef<'a>) -> Self {
        Self {
            start: Some(start),
            stack: Vec::new(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.stack.push((start, start.children().iter()));
            return Some(WalkEvent::Enter(start));
        }
        let (node, children) = self.stack.last_mut()?;
        let node = *node;
        match children.next() {
            Some(Child::Text(text)) => Some(WalkEvent::Text(node, text)),
            Some(Child::Element(id)) => {
                let child = NodeRef::new(node.document(), *id);
                self.stack.push((child, child.children().iter()));
                Some(WalkEvent::Enter(child))
            }
            None => {
                let _ = self.stack.pop();
                Some(WalkEvent::Leave(node))
            }
        }
    }
}
