//! Running selector chains against a document.

use std::collections::BTreeSet;
use std::rc::Rc;

use sift_dom::{Document, NodeRef};
use tracing::debug;

use crate::chain::SelectorChain;
use crate::error::SelectorError;

impl SelectorChain {
    /// Every descendant of `root` matched by the whole chain, in document
    /// order, stopping after `limit` results. `root` itself is never a
    /// candidate.
    #[must_use]
    pub fn search<'a>(&self, root: NodeRef<'a>, limit: usize) -> Vec<NodeRef<'a>> {
        let mut results = Vec::new();
        if limit == 0 {
            return results;
        }
        let steps = self.steps();
        let last = steps.len() - 1;

        // Each entry carries the steps the node may be tested against.
        let first: Rc<[usize]> = Rc::from([0]);
        let mut stack: Vec<(NodeRef<'a>, Rc<[usize]>)> = root
            .element_children()
            .rev()
            .map(|child| (child, Rc::clone(&first)))
            .collect();

        while let Some((node, live)) = stack.pop() {
            let mut next = BTreeSet::new();
            let mut hit = false;
            for &i in &*live {
                let step = &steps[i];
                if !step.direct_child {
                    let _ = next.insert(i);
                }
                if step.matches(node, self.match_mode()) {
                    if i == last {
                        hit = true;
                    } else {
                        let _ = next.insert(i + 1);
                    }
                }
            }

            if hit {
                results.push(node);
                if results.len() >= limit {
                    break;
                }
            }
            if next.is_empty() {
                continue;
            }
            let next: Rc<[usize]> = next.into_iter().collect();
            stack.extend(
                node.element_children()
                    .rev()
                    .map(|child| (child, Rc::clone(&next))),
            );
        }
        results
    }
}

/// Selector queries on anything that can act as a search root.
pub trait Select<'a>: Copy {
    /// The node whose descendants are searched.
    fn search_root(self) -> NodeRef<'a>;

    /// Run a compiled chain, keeping at most `limit` matches.
    #[must_use]
    fn select_chain(self, chain: &SelectorChain, limit: usize) -> Vec<NodeRef<'a>> {
        let found = chain.search(self.search_root(), limit);
        debug!(selector = %chain, matches = found.len(), "Selected nodes");
        found
    }

    /// Every match of `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if `selector` does not compile.
    fn select(self, selector: &str) -> Result<Vec<NodeRef<'a>>, SelectorError> {
        let chain = SelectorChain::parse(selector)?;
        Ok(self.select_chain(&chain, usize::MAX))
    }

    /// The first match of `selector` in document order.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if `selector` does not compile.
    fn select_first(self, selector: &str) -> Result<Option<NodeRef<'a>>, SelectorError> {
        let chain = SelectorChain::parse(selector)?;
        Ok(self.select_chain(&chain, 1).into_iter().next())
    }

    /// The union of all matches of `selectors`, in document order and
    /// without duplicates.
    ///
    /// # Errors
    ///
    /// Returns the first [`SelectorError`] among `selectors`.
    fn select_any(self, selectors: &[&str]) -> Result<Vec<NodeRef<'a>>, SelectorError> {
        let chains = compile_all(selectors)?;
        Ok(self.select_any_chains(&chains))
    }

    /// [`Select::select_any`] over chains that are already compiled.
    #[must_use]
    fn select_any_chains(self, chains: &[SelectorChain]) -> Vec<NodeRef<'a>> {
        let mut found: Vec<NodeRef<'a>> = chains
            .iter()
            .flat_map(|chain| self.select_chain(chain, usize::MAX))
            .collect();
        // Nodes are allocated in document order.
        found.sort_by_key(|node| node.id());
        found.dedup_by_key(|node| node.id());
        found
    }

    /// The first match of the first selector in `selectors` that matches
    /// anything. Selectors are tried in order, so earlier ones take
    /// priority regardless of where their matches sit in the document.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] for the first selector that does not
    /// compile, even if an earlier one matched.
    fn select_first_of(self, selectors: &[&str]) -> Result<Option<NodeRef<'a>>, SelectorError> {
        let chains = compile_all(selectors)?;
        Ok(self.select_first_of_chains(&chains))
    }

    /// [`Select::select_first_of`] over chains that are already compiled.
    #[must_use]
    fn select_first_of_chains(self, chains: &[SelectorChain]) -> Option<NodeRef<'a>> {
        chains
            .iter()
            .find_map(|chain| self.select_chain(chain, 1).into_iter().next())
    }
}

fn compile_all(selectors: &[&str]) -> Result<Vec<SelectorChain>, SelectorError> {
    selectors
        .iter()
        .map(|selector| SelectorChain::parse(selector))
        .collect()
}

impl<'a> Select<'a> for NodeRef<'a> {
    fn search_root(self) -> NodeRef<'a> {
        self
    }
}

impl<'a> Select<'a> for &'a Document {
    fn search_root(self) -> NodeRef<'a> {
        self.root()
    }
}
