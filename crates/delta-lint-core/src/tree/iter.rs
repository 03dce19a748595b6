//! Lazy traversal iterators over a [`SyntaxTree`].
//!
//! All iterators are cheap to clone, so a partially consumed sequence can be
//! restarted from any point.

use super::{NodeId, NodeRef, SyntaxTree};
use std::iter::FusedIterator;

/// A node followed by its next siblings.
#[derive(Debug, Clone)]
pub struct Siblings<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl<'t> Siblings<'t> {
    pub(super) fn new(tree: &'t SyntaxTree, start: Option<NodeId>) -> Self {
        Self { tree, next: start }
    }
}

impl<'t> Iterator for Siblings<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.next?)?;
        self.next = node.next_sibling().map(NodeRef::id);
        Some(node)
    }
}

impl FusedIterator for Siblings<'_> {}

/// Pre-order traversal bounded to one subtree.
///
/// Walks parent links instead of keeping a stack; the walk never climbs above
/// the subtree root.
#[derive(Debug, Clone)]
pub struct Descendants<'t> {
    root: NodeRef<'t>,
    next: Option<NodeRef<'t>>,
}

impl<'t> Descendants<'t> {
    pub(super) fn below(root: NodeRef<'t>) -> Self {
        Self {
            root,
            next: root.first_child(),
        }
    }

    pub(super) fn including(root: NodeRef<'t>) -> Self {
        Self {
            root,
            next: Some(root),
        }
    }

    fn successor(&self, node: NodeRef<'t>) -> Option<NodeRef<'t>> {
        if let Some(child) = node.first_child() {
            return Some(child);
        }
        let mut current = node;
        loop {
            if current == self.root {
                return None;
            }
            if let Some(sibling) = current.next_sibling() {
                return Some(sibling);
            }
            current = current.parent()?;
        }
    }
}

impl<'t> Iterator for Descendants<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = self.successor(node);
        Some(node)
    }
}

impl FusedIterator for Descendants<'_> {}

/// Parent, grandparent, ... up to the root.
#[derive(Debug, Clone)]
pub struct Ancestors<'t> {
    next: Option<NodeRef<'t>>,
}

impl<'t> Ancestors<'t> {
    pub(super) fn new(start: Option<NodeRef<'t>>) -> Self {
        Self { next: start }
    }
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent();
        Some(node)
    }
}

impl FusedIterator for Ancestors<'_> {}
