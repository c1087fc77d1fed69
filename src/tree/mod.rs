//! Navigable query tree over a host syntax tree.
//!
//! A [`QueryTree`] wraps every node of a host tree once, recording for each
//! one its parent, depth and position among its siblings. Nodes are stored
//! in an arena owned by the tree and addressed by index; index 0 is the
//! synthetic document node. [`QueryNode`] is a copyable handle into that
//! arena and the only way consumers see the tree.
//!
//! Three kinds of node exist:
//!
//! - the **document**, a synthetic root whose children are the host tree's
//!   top-level nodes,
//! - **elements**, one per host node,
//! - **attributes**, synthetic leaves holding an element's identifying
//!   text, reachable only through the attribute axis of their element.

mod order;

pub use order::sort_in_order;

use crate::axis::{Axis, AxisIter, Children};
use crate::error::QueryError;
use crate::host::HostTree;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::sync::OnceLock;

/// Name of the only attribute an element exposes.
pub const TEXT_ATTRIBUTE: &str = "text";

const DOCUMENT: u32 = 0;

/// Kind of a [`QueryNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Document => "document",
            NodeKind::Element => "element",
            NodeKind::Attribute => "attribute",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct NodeRecord<N> {
    host: Option<N>,
    parent: Option<u32>,
    depth: u32,
    sibling_index: u32,
    first_child: u32,
    child_count: u32,
    // Empty until first read; `Some(None)` once the host reported no text.
    text_attribute: OnceLock<Option<String>>,
}

impl<N> NodeRecord<N> {
    fn new(host: Option<N>, parent: Option<u32>, depth: u32, sibling_index: u32) -> Self {
        Self {
            host,
            parent,
            depth,
            sibling_index,
            first_child: 0,
            child_count: 0,
            text_attribute: OnceLock::new(),
        }
    }
}

/// Query tree built once per host tree.
///
/// The tree is immutable after construction apart from the per-element text
/// attribute, which is computed on first access through a compute-once cell.
/// A `QueryTree` is therefore `Sync` whenever its host is.
pub struct QueryTree<H: HostTree> {
    host: H,
    nodes: Vec<NodeRecord<H::Node>>,
}

impl<H: HostTree> QueryTree<H> {
    /// Wrap every node of `host`.
    ///
    /// Construction walks the host breadth-first with a work queue, so the
    /// children of each node occupy a contiguous range of the arena and no
    /// call-stack recursion happens regardless of tree depth.
    pub fn new(host: H) -> Self {
        let mut nodes = vec![NodeRecord::new(None, None, 0, 0)];
        let mut queue = VecDeque::new();
        if let Some(root) = host.root() {
            queue.push_back((DOCUMENT, root));
        }

        while let Some((parent, first)) = queue.pop_front() {
            let first_id = nodes.len() as u32;
            let depth = nodes[parent as usize].depth + 1;
            let mut count = 0u32;
            let mut current = Some(first);
            while let Some(host_node) = current {
                let id = nodes.len() as u32;
                nodes.push(NodeRecord::new(Some(host_node), Some(parent), depth, count));
                if let Some(child) = host.first_child(host_node) {
                    queue.push_back((id, child));
                }
                count += 1;
                current = host.next_sibling(host_node);
            }
            let record = &mut nodes[parent as usize];
            record.first_child = first_id;
            record.child_count = count;
        }

        tracing::debug!(nodes = nodes.len(), "built query tree");
        Self { host, nodes }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// The synthetic document node.
    pub fn document(&self) -> QueryNode<'_, H> {
        QueryNode::new(self, Slot::Node(DOCUMENT))
    }

    /// Number of navigable nodes, the document included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the host tree had no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Element wrapping `host_node`, found by a linear scan of the arena.
    pub fn element_for(&self, host_node: H::Node) -> Option<QueryNode<'_, H>> {
        self.nodes
            .iter()
            .position(|record| record.host == Some(host_node))
            .map(|id| QueryNode::new(self, Slot::Node(id as u32)))
    }

    fn record(&self, id: u32) -> &NodeRecord<H::Node> {
        &self.nodes[id as usize]
    }

    pub(crate) fn parent_of(&self, id: u32) -> Option<u32> {
        self.record(id).parent
    }

    pub(crate) fn depth_of(&self, id: u32) -> u32 {
        self.record(id).depth
    }

    pub(crate) fn sibling_index_of(&self, id: u32) -> u32 {
        self.record(id).sibling_index
    }

    /// Arena range holding the children of `id`.
    pub(crate) fn child_range(&self, id: u32) -> std::ops::Range<u32> {
        let record = self.record(id);
        record.first_child..record.first_child + record.child_count
    }

    /// Arena range holding `id` and its siblings.
    pub(crate) fn sibling_range(&self, id: u32) -> std::ops::Range<u32> {
        match self.parent_of(id) {
            Some(parent) => self.child_range(parent),
            None => id..id + 1,
        }
    }

    fn text_attribute_of(&self, id: u32) -> Option<&str> {
        let record = self.record(id);
        let host_node = record.host?;
        record
            .text_attribute
            .get_or_init(|| {
                self.host
                    .text_attribute(host_node)
                    .map(|text| text.into_owned())
            })
            .as_deref()
    }
}

impl<H: HostTree> fmt::Debug for QueryTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryTree")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// Position of a handle inside its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    /// Document (index 0) or element.
    Node(u32),
    /// Text attribute owned by the element at this index.
    Attribute(u32),
}

/// Handle to one node of a [`QueryTree`].
pub struct QueryNode<'t, H: HostTree> {
    tree: &'t QueryTree<H>,
    slot: Slot,
}

impl<'t, H: HostTree> Clone for QueryNode<'t, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, H: HostTree> Copy for QueryNode<'t, H> {}

impl<'t, H: HostTree> PartialEq for QueryNode<'t, H> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_node(other)
    }
}

impl<'t, H: HostTree> Eq for QueryNode<'t, H> {}

impl<'t, H: HostTree> fmt::Debug for QueryNode<'t, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Slot::Node(DOCUMENT) => f.write_str("Document"),
            Slot::Node(id) => {
                write!(f, "Element({}", self.name())?;
                if let (Some(line), Some(column)) = (self.line(), self.column()) {
                    write!(f, " @{line}:{column}")?;
                }
                write!(f, " #{id})")
            }
            Slot::Attribute(owner) => {
                write!(f, "Attribute(@text={:?} of #{owner})", self.text_value())
            }
        }
    }
}

impl<'t, H: HostTree> QueryNode<'t, H> {
    pub(crate) fn new(tree: &'t QueryTree<H>, slot: Slot) -> Self {
        Self { tree, slot }
    }

    pub(crate) fn tree(&self) -> &'t QueryTree<H> {
        self.tree
    }

    pub(crate) fn slot(&self) -> Slot {
        self.slot
    }

    /// Arena index of a navigable node, or the unsupported-operation error
    /// for attributes.
    pub(crate) fn navigable_id(&self, operation: &'static str) -> Result<u32, QueryError> {
        match self.slot {
            Slot::Node(id) => Ok(id),
            Slot::Attribute(_) => Err(QueryError::unsupported(operation, NodeKind::Attribute)),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.slot {
            Slot::Node(DOCUMENT) => NodeKind::Document,
            Slot::Node(_) => NodeKind::Element,
            Slot::Attribute(_) => NodeKind::Attribute,
        }
    }

    /// Host kind name for elements, `"text"` for attributes and the empty
    /// string for the document.
    pub fn name(&self) -> &'t str {
        match self.slot {
            Slot::Node(id) => match self.tree.record(id).host {
                Some(host_node) => self.tree.host.kind(host_node),
                None => "",
            },
            Slot::Attribute(_) => TEXT_ATTRIBUTE,
        }
    }

    /// Underlying host node; `None` for the document and attributes.
    pub fn host_node(&self) -> Option<H::Node> {
        match self.slot {
            Slot::Node(id) => self.tree.record(id).host,
            Slot::Attribute(_) => None,
        }
    }

    /// Raw host text of an element.
    pub fn text(&self) -> Option<&'t str> {
        self.host_node().map(|n| self.tree.host.text(n))
    }

    pub fn line(&self) -> Option<usize> {
        self.host_node().map(|n| self.tree.host.line(n))
    }

    pub fn column(&self) -> Option<usize> {
        self.host_node().map(|n| self.tree.host.column(n))
    }

    /// Distance from the document; attributes sit one below their element.
    pub fn depth(&self) -> usize {
        match self.slot {
            Slot::Node(id) => self.tree.depth_of(id) as usize,
            Slot::Attribute(owner) => self.tree.depth_of(owner) as usize + 1,
        }
    }

    /// Position among the children of the parent; 0 for the document and
    /// attributes.
    pub fn sibling_index(&self) -> usize {
        match self.slot {
            Slot::Node(id) => self.tree.sibling_index_of(id) as usize,
            Slot::Attribute(_) => 0,
        }
    }

    pub fn parent(&self) -> Result<Option<QueryNode<'t, H>>, QueryError> {
        let id = self.navigable_id("parent")?;
        Ok(self
            .tree
            .parent_of(id)
            .map(|parent| QueryNode::new(self.tree, Slot::Node(parent))))
    }

    /// The document node of this tree.
    pub fn root(&self) -> Result<QueryNode<'t, H>, QueryError> {
        self.navigable_id("root")?;
        Ok(self.tree.document())
    }

    /// Children in host order.
    pub fn children(&self) -> Result<Children<'t, H>, QueryError> {
        let id = self.navigable_id("children")?;
        Ok(Children::new(self.tree, self.tree.child_range(id)))
    }

    /// Named attribute of an element.
    ///
    /// Only `"text"` is recognized; any other name yields `Ok(None)`. The
    /// attribute node is returned only when the element's host kind carries
    /// identifying text.
    pub fn attribute(&self, name: &str) -> Result<Option<QueryNode<'t, H>>, QueryError> {
        match self.slot {
            Slot::Node(DOCUMENT) => Err(QueryError::unsupported("attribute", NodeKind::Document)),
            Slot::Attribute(_) => Err(QueryError::unsupported("attribute", NodeKind::Attribute)),
            Slot::Node(id) => {
                if name != TEXT_ATTRIBUTE {
                    return Ok(None);
                }
                Ok(self
                    .tree
                    .text_attribute_of(id)
                    .map(|_| QueryNode::new(self.tree, Slot::Attribute(id))))
            }
        }
    }

    /// Attribute value, or an element's text attribute value.
    pub fn text_value(&self) -> Option<&'t str> {
        match self.slot {
            Slot::Node(DOCUMENT) => None,
            Slot::Node(id) | Slot::Attribute(id) => self.tree.text_attribute_of(id),
        }
    }

    /// Relative order of two nodes of the same tree.
    ///
    /// Shallower nodes order first; nodes at equal depth are ordered by the
    /// sibling positions of their ancestors just below the closest common
    /// ancestor. See [`sort_in_order`].
    pub fn compare_order(&self, other: &QueryNode<'t, H>) -> Result<Ordering, QueryError> {
        let this = self.navigable_id("compare_order")?;
        let that = other.navigable_id("compare_order")?;
        if !std::ptr::eq(self.tree, other.tree) {
            return Err(QueryError::unsupported("compare_order", self.kind()));
        }
        Ok(order::compare(self.tree, this, that))
    }

    /// Nodes along `axis`, lazily.
    pub fn axis(&self, axis: Axis) -> Result<AxisIter<'t, H>, QueryError> {
        AxisIter::new(*self, axis)
    }

    /// Nodes along the axis with the given XPath name, such as
    /// `"following-sibling"`.
    pub fn axis_named(&self, name: &str) -> Result<AxisIter<'t, H>, QueryError> {
        self.axis(name.parse()?)
    }

    /// Identity comparison: same tree, same position.
    pub fn is_same_node(&self, other: &QueryNode<'_, H>) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.slot == other.slot
    }
}
