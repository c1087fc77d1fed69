use crate::host::HostTree;
use crate::tree::{QueryNode, QueryTree, Slot};
use std::iter::FusedIterator;
use std::ops::Range;

fn handle<H: HostTree>(tree: &QueryTree<H>, id: u32) -> QueryNode<'_, H> {
    QueryNode::new(tree, Slot::Node(id))
}

/// Consecutive arena slots sharing one parent.
pub struct Children<'t, H: HostTree> {
    tree: &'t QueryTree<H>,
    range: Range<u32>,
}

impl<'t, H: HostTree> Children<'t, H> {
    pub(crate) fn new(tree: &'t QueryTree<H>, range: Range<u32>) -> Self {
        Self { tree, range }
    }
}

impl<'t, H: HostTree> Iterator for Children<'t, H> {
    type Item = QueryNode<'t, H>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|id| handle(self.tree, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'t, H: HostTree> DoubleEndedIterator for Children<'t, H> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|id| handle(self.tree, id))
    }
}

impl<'t, H: HostTree> ExactSizeIterator for Children<'t, H> {}

impl<'t, H: HostTree> FusedIterator for Children<'t, H> {}

/// Parent chain up to and including the document.
pub(crate) struct Ancestors<'t, H: HostTree> {
    tree: &'t QueryTree<H>,
    next: Option<u32>,
}

impl<'t, H: HostTree> Ancestors<'t, H> {
    pub(crate) fn new(tree: &'t QueryTree<H>, start: Option<u32>) -> Self {
        Self { tree, next: start }
    }
}

impl<'t, H: HostTree> Iterator for Ancestors<'t, H> {
    type Item = QueryNode<'t, H>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.parent_of(id);
        Some(handle(self.tree, id))
    }
}

/// Pre-order walk of a subtree.
///
/// The stack holds, per open level, the children not yet visited, so its
/// length is bounded by the subtree height and never by the call stack.
pub(crate) struct Descendants<'t, H: HostTree> {
    tree: &'t QueryTree<H>,
    pending_self: Option<u32>,
    stack: Vec<Range<u32>>,
}

impl<'t, H: HostTree> Descendants<'t, H> {
    pub(crate) fn new(tree: &'t QueryTree<H>, id: u32, include_self: bool) -> Self {
        let children = tree.child_range(id);
        let stack = if children.is_empty() {
            Vec::new()
        } else {
            vec![children]
        };
        Self {
            tree,
            pending_self: include_self.then_some(id),
            stack,
        }
    }
}

impl<'t, H: HostTree> Iterator for Descendants<'t, H> {
    type Item = QueryNode<'t, H>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(id) = self.pending_self.take() {
            return Some(handle(self.tree, id));
        }

        loop {
            let top = self.stack.last_mut()?;
            let Some(id) = top.next() else {
                self.stack.pop();
                continue;
            };
            if top.is_empty() {
                self.stack.pop();
            }
            let children = self.tree.child_range(id);
            if !children.is_empty() {
                self.stack.push(children);
            }
            return Some(handle(self.tree, id));
        }
    }
}

struct Frame {
    id: u32,
    children: Range<u32>,
}

/// Reverse document order of a subtree: the last descendant first and the
/// subtree root last.
pub(crate) struct ReverseSubtree<'t, H: HostTree> {
    tree: &'t QueryTree<H>,
    stack: Vec<Frame>,
}

impl<'t, H: HostTree> ReverseSubtree<'t, H> {
    pub(crate) fn new(tree: &'t QueryTree<H>, id: u32) -> Self {
        Self {
            tree,
            stack: vec![Frame {
                id,
                children: tree.child_range(id),
            }],
        }
    }
}

impl<'t, H: HostTree> Iterator for ReverseSubtree<'t, H> {
    type Item = QueryNode<'t, H>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.children.next_back() {
                Some(child) => self.stack.push(Frame {
                    id: child,
                    children: self.tree.child_range(child),
                }),
                None => {
                    let done = self.stack.pop()?;
                    return Some(handle(self.tree, done.id));
                }
            }
        }
    }
}

/// Nodes after the start node in document order, its descendants excluded.
///
/// The outer cursor moves one ancestor level at a time; at each level the
/// following siblings are walked with their subtrees before ascending.
pub(crate) struct Following<'t, H: HostTree> {
    tree: &'t QueryTree<H>,
    level: u32,
    siblings: Range<u32>,
    subtree: Option<Descendants<'t, H>>,
}

impl<'t, H: HostTree> Following<'t, H> {
    pub(crate) fn new(tree: &'t QueryTree<H>, id: u32) -> Self {
        Self {
            tree,
            level: id,
            siblings: id + 1..tree.sibling_range(id).end,
            subtree: None,
        }
    }
}

impl<'t, H: HostTree> Iterator for Following<'t, H> {
    type Item = QueryNode<'t, H>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(subtree) = &mut self.subtree {
                if let Some(node) = subtree.next() {
                    return Some(node);
                }
                self.subtree = None;
            }

            if let Some(sibling) = self.siblings.next() {
                self.subtree = Some(Descendants::new(self.tree, sibling, true));
                continue;
            }

            let parent = self.tree.parent_of(self.level)?;
            self.level = parent;
            self.siblings = parent + 1..self.tree.sibling_range(parent).end;
        }
    }
}

/// Nodes before the start node in reverse document order, its ancestors
/// excluded.
pub(crate) struct Preceding<'t, H: HostTree> {
    tree: &'t QueryTree<H>,
    level: u32,
    siblings: Range<u32>,
    subtree: Option<ReverseSubtree<'t, H>>,
}

impl<'t, H: HostTree> Preceding<'t, H> {
    pub(crate) fn new(tree: &'t QueryTree<H>, id: u32) -> Self {
        Self {
            tree,
            level: id,
            siblings: tree.sibling_range(id).start..id,
            subtree: None,
        }
    }
}

impl<'t, H: HostTree> Iterator for Preceding<'t, H> {
    type Item = QueryNode<'t, H>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(subtree) = &mut self.subtree {
                if let Some(node) = subtree.next() {
                    return Some(node);
                }
                self.subtree = None;
            }

            if let Some(sibling) = self.siblings.next_back() {
                self.subtree = Some(ReverseSubtree::new(self.tree, sibling));
                continue;
            }

            let parent = self.tree.parent_of(self.level)?;
            self.level = parent;
            self.siblings = self.tree.sibling_range(parent).start..parent;
        }
    }
}

impl<'t, H: HostTree> FusedIterator for Ancestors<'t, H> {}
