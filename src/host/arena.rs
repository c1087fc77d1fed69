//! In-memory host tree.
//!
//! [`SyntaxTree`] is the host tree for parsers that do not have their own
//! tree type to adapt: they feed nodes into a [`SyntaxTreeBuilder`] in
//! parent-before-child order and hand the result to the query layer.

use crate::host::HostTree;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

/// Index of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct SyntaxNode {
    kind: String,
    text: String,
    line: usize,
    column: usize,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
    previous_sibling: Option<NodeId>,
}

/// Arena-backed host tree with owned kind names and texts.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    text_kinds: HashSet<String>,
    lines: Vec<String>,
}

impl SyntaxTree {
    pub fn builder() -> SyntaxTreeBuilder {
        SyntaxTreeBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replace the set of kinds that carry a text attribute.
    pub fn set_text_kinds<I, S>(&mut self, kinds: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_kinds = kinds.into_iter().map(Into::into).collect();
    }

    fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }
}

impl HostTree for SyntaxTree {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    fn kind(&self, node: NodeId) -> &str {
        &self.node(node).kind
    }

    fn text(&self, node: NodeId) -> &str {
        &self.node(node).text
    }

    fn line(&self, node: NodeId) -> usize {
        self.node(node).line
    }

    fn column(&self, node: NodeId) -> usize {
        self.node(node).column
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).first_child
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).next_sibling
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).previous_sibling
    }

    fn text_attribute(&self, node: NodeId) -> Option<Cow<'_, str>> {
        let node = self.node(node);
        self.text_kinds
            .contains(&node.kind)
            .then(|| Cow::Borrowed(node.text.as_str()))
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }
}

/// Incremental builder for [`SyntaxTree`].
///
/// Children are appended after any existing children of their parent, so
/// feeding nodes in source order yields host order.
#[derive(Debug, Default)]
pub struct SyntaxTreeBuilder {
    tree: SyntaxTree,
    last_root: Option<NodeId>,
}

impl SyntaxTreeBuilder {
    /// Kinds whose nodes expose their text as a text attribute.
    pub fn text_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tree.set_text_kinds(kinds);
        self
    }

    /// Source text the tree was parsed from, used for tab expansion.
    pub fn source(mut self, source: &str) -> Self {
        self.tree.lines = source.lines().map(str::to_string).collect();
        self
    }

    /// Append a top-level node after any previous top-level node.
    pub fn root(
        &mut self,
        kind: impl Into<String>,
        text: impl Into<String>,
        line: usize,
        column: usize,
    ) -> NodeId {
        let id = self.push(kind.into(), text.into(), line, column, None);
        if let Some(previous) = self.last_root.replace(id) {
            self.tree.nodes[previous.index()].next_sibling = Some(id);
            self.tree.nodes[id.index()].previous_sibling = Some(previous);
        }
        id
    }

    /// Append a node as the last child of `parent`.
    pub fn child(
        &mut self,
        parent: NodeId,
        kind: impl Into<String>,
        text: impl Into<String>,
        line: usize,
        column: usize,
    ) -> NodeId {
        let id = self.push(kind.into(), text.into(), line, column, Some(parent));
        let previous = self.tree.nodes[parent.index()].last_child.replace(id);
        match previous {
            Some(previous) => {
                self.tree.nodes[previous.index()].next_sibling = Some(id);
                self.tree.nodes[id.index()].previous_sibling = Some(previous);
            }
            None => self.tree.nodes[parent.index()].first_child = Some(id),
        }
        id
    }

    pub fn build(self) -> SyntaxTree {
        self.tree
    }

    fn push(
        &mut self,
        kind: String,
        text: String,
        line: usize,
        column: usize,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.tree.nodes.len() as u32);
        self.tree.nodes.push(SyntaxNode {
            kind,
            text,
            line,
            column,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
            previous_sibling: None,
        });
        id
    }
}
