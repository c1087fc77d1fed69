//! Host syntax trees.
//!
//! A host tree is the parsed source tree produced by some external parser.
//! This crate never builds or mutates one; it only reads it through the
//! [`HostTree`] trait. Two implementations ship with the crate: the
//! in-memory [`arena::SyntaxTree`] and the tree-sitter backed
//! [`crate::ts::TsHost`].

pub mod arena;

pub use arena::{NodeId, SyntaxTree, SyntaxTreeBuilder};

use std::borrow::Cow;
use std::fmt::Debug;

/// Read-only view of a parsed source tree.
///
/// Lines are 1-based. Columns are 0-based character offsets within their line.
pub trait HostTree {
    /// Cheap handle to one node of the tree.
    type Node: Copy + Eq + Debug;

    /// First top-level node. Top-level nodes may have siblings.
    fn root(&self) -> Option<Self::Node>;

    /// Kind name of the node, used verbatim as a path segment.
    fn kind(&self, node: Self::Node) -> &str;

    /// Raw token text of the node, possibly empty.
    fn text(&self, node: Self::Node) -> &str;

    fn line(&self, node: Self::Node) -> usize;

    fn column(&self, node: Self::Node) -> usize;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    fn previous_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Identifying text of the node, for kinds that carry one.
    fn text_attribute(&self, node: Self::Node) -> Option<Cow<'_, str>>;

    /// Source text of a 1-based line, without its terminator.
    ///
    /// Hosts that do not keep their source return `None`; tab expansion then
    /// falls back to the raw column.
    fn line_text(&self, line: usize) -> Option<&str>;

    fn has_text_attribute(&self, node: Self::Node) -> bool {
        self.text_attribute(node).is_some()
    }

    /// First descendant carrying a text attribute.
    ///
    /// The direct children of a node are inspected before descending into
    /// any of them; subtrees are then searched in child order.
    fn first_text_descendant(&self, node: Self::Node) -> Option<Self::Node> {
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            let mut child = self.first_child(current);
            let mut subtrees = Vec::new();
            while let Some(c) = child {
                if self.has_text_attribute(c) {
                    return Some(c);
                }
                subtrees.push(c);
                child = self.next_sibling(c);
            }
            pending.extend(subtrees.into_iter().rev());
        }
        None
    }
}

impl<T: HostTree + ?Sized> HostTree for &T {
    type Node = T::Node;

    fn root(&self) -> Option<Self::Node> {
        (**self).root()
    }

    fn kind(&self, node: Self::Node) -> &str {
        (**self).kind(node)
    }

    fn text(&self, node: Self::Node) -> &str {
        (**self).text(node)
    }

    fn line(&self, node: Self::Node) -> usize {
        (**self).line(node)
    }

    fn column(&self, node: Self::Node) -> usize {
        (**self).column(node)
    }

    fn parent(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).parent(node)
    }

    fn first_child(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).first_child(node)
    }

    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).next_sibling(node)
    }

    fn previous_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).previous_sibling(node)
    }

    fn text_attribute(&self, node: Self::Node) -> Option<Cow<'_, str>> {
        (**self).text_attribute(node)
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        (**self).line_text(line)
    }

    fn first_text_descendant(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).first_text_descendant(node)
    }
}

/// Display width of the first `chars` characters of `line`, with each tab
/// advancing to the next multiple of `tab_width`.
pub fn expanded_width(line: &str, chars: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    line.chars().take(chars).fold(0, |width, ch| {
        if ch == '\t' {
            (width / tab_width + 1) * tab_width
        } else {
            width + 1
        }
    })
}

/// 1-based column of `node` with tabs expanded, the measure a
/// [`Location`](crate::path::Location) is given in.
pub fn display_column<H: HostTree + ?Sized>(
    host: &H,
    node: H::Node,
    tab_width: usize,
) -> usize {
    let column = host.column(node);
    match host.line_text(host.line(node)) {
        Some(line) => 1 + expanded_width(line, column, tab_width),
        None => 1 + column,
    }
}
