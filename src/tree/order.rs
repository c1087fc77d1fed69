use crate::host::HostTree;
use crate::tree::{QueryNode, QueryTree, Slot};
use std::cmp::Ordering;

/// Order two navigable nodes of one tree.
///
/// Depth decides first. At equal depth both ancestor chains are climbed in
/// lock-step until the two nodes share a parent, and their sibling indexes
/// decide. This matches document order for nodes at the same depth and for
/// ancestor/descendant pairs, but orders a shallow node before a deeper one
/// even when the deeper one comes first in document order.
pub(crate) fn compare<H: HostTree>(tree: &QueryTree<H>, first: u32, second: u32) -> Ordering {
    if first == second {
        return Ordering::Equal;
    }

    let by_depth = tree.depth_of(first).cmp(&tree.depth_of(second));
    if by_depth != Ordering::Equal {
        return by_depth;
    }

    let (mut left, mut right) = (first, second);
    loop {
        match (tree.parent_of(left), tree.parent_of(right)) {
            (Some(l), Some(r)) if l == r => break,
            (Some(l), Some(r)) => {
                left = l;
                right = r;
            }
            // Only the document lacks a parent and it is alone at depth 0.
            _ => return Ordering::Equal,
        }
    }

    tree.sibling_index_of(left).cmp(&tree.sibling_index_of(right))
}

/// Sort a result set with [`QueryNode::compare_order`].
///
/// Attributes sort directly after their owning element. All nodes must come
/// from the same tree.
pub fn sort_in_order<H: HostTree>(nodes: &mut [QueryNode<'_, H>]) {
    nodes.sort_by(|a, b| {
        let key = |n: &QueryNode<'_, H>| match n.slot() {
            Slot::Node(id) => (id, false),
            Slot::Attribute(owner) => (owner, true),
        };
        let (a_id, a_attr) = key(a);
        let (b_id, b_attr) = key(b);
        compare(a.tree(), a_id, b_id).then(a_attr.cmp(&b_attr))
    });
}
