//! Path-query axes over a [`QueryTree`](crate::tree::QueryTree).
//!
//! Every axis is a lazy cursor over the arena. None of them recurse on the
//! call stack: descendant walks keep an explicit stack of pending child
//! ranges, and following/preceding combine an outer cursor over ancestor
//! levels with an inner cursor over one sibling subtree at a time. Callers
//! may drop an iterator at any point.

mod cursor;

pub use cursor::Children;

use crate::error::QueryError;
use crate::host::HostTree;
use crate::tree::{NodeKind, QueryNode, Slot};
use cursor::{Ancestors, Descendants, Following, Preceding};
use std::fmt;
use std::iter::{FusedIterator, Rev};
use std::str::FromStr;

/// The fixed set of supported axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Self_,
    Parent,
    Attribute,
    Child,
    Descendant,
    DescendantOrSelf,
    Ancestor,
    AncestorOrSelf,
    FollowingSibling,
    PrecedingSibling,
    Following,
    Preceding,
}

impl Axis {
    pub const ALL: [Axis; 12] = [
        Axis::Self_,
        Axis::Parent,
        Axis::Attribute,
        Axis::Child,
        Axis::Descendant,
        Axis::DescendantOrSelf,
        Axis::Ancestor,
        Axis::AncestorOrSelf,
        Axis::FollowingSibling,
        Axis::PrecedingSibling,
        Axis::Following,
        Axis::Preceding,
    ];

    /// XPath name of the axis.
    pub fn name(self) -> &'static str {
        match self {
            Axis::Self_ => "self",
            Axis::Parent => "parent",
            Axis::Attribute => "attribute",
            Axis::Child => "child",
            Axis::Descendant => "descendant",
            Axis::DescendantOrSelf => "descendant-or-self",
            Axis::Ancestor => "ancestor",
            Axis::AncestorOrSelf => "ancestor-or-self",
            Axis::FollowingSibling => "following-sibling",
            Axis::PrecedingSibling => "preceding-sibling",
            Axis::Following => "following",
            Axis::Preceding => "preceding",
        }
    }

    /// Axes defined on the document node; the rest raise
    /// `UnsupportedOperation` there.
    fn applies_to_document(self) -> bool {
        !matches!(
            self,
            Axis::Attribute
                | Axis::FollowingSibling
                | Axis::PrecedingSibling
                | Axis::Following
                | Axis::Preceding
        )
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::ALL
            .into_iter()
            .find(|axis| axis.name() == s)
            .ok_or_else(|| QueryError::UnsupportedAxis {
                name: s.to_string(),
            })
    }
}

/// Lazy sequence of nodes along one axis.
pub struct AxisIter<'t, H: HostTree> {
    inner: Inner<'t, H>,
}

enum Inner<'t, H: HostTree> {
    Single(Option<QueryNode<'t, H>>),
    Siblings(Children<'t, H>),
    ReverseSiblings(Rev<Children<'t, H>>),
    Ancestors(Ancestors<'t, H>),
    Descendants(Descendants<'t, H>),
    Following(Following<'t, H>),
    Preceding(Preceding<'t, H>),
}

impl<'t, H: HostTree> AxisIter<'t, H> {
    pub(crate) fn new(node: QueryNode<'t, H>, axis: Axis) -> Result<Self, QueryError> {
        let id = match node.slot() {
            Slot::Node(id) => id,
            Slot::Attribute(_) => {
                return Err(QueryError::unsupported(axis.name(), NodeKind::Attribute))
            }
        };
        if node.kind() == NodeKind::Document && !axis.applies_to_document() {
            return Err(QueryError::unsupported(axis.name(), NodeKind::Document));
        }
        let tree = node.tree();

        let inner = match axis {
            Axis::Self_ => Inner::Single(Some(node)),
            Axis::Parent => Inner::Single(node.parent()?),
            Axis::Attribute => Inner::Single(node.attribute(crate::tree::TEXT_ATTRIBUTE)?),
            Axis::Child => Inner::Siblings(Children::new(tree, tree.child_range(id))),
            Axis::Descendant => Inner::Descendants(Descendants::new(tree, id, false)),
            Axis::DescendantOrSelf => Inner::Descendants(Descendants::new(tree, id, true)),
            Axis::Ancestor => Inner::Ancestors(Ancestors::new(tree, tree.parent_of(id))),
            Axis::AncestorOrSelf => Inner::Ancestors(Ancestors::new(tree, Some(id))),
            Axis::FollowingSibling => {
                let siblings = tree.sibling_range(id);
                Inner::Siblings(Children::new(tree, id + 1..siblings.end))
            }
            Axis::PrecedingSibling => {
                let siblings = tree.sibling_range(id);
                Inner::ReverseSiblings(Children::new(tree, siblings.start..id).rev())
            }
            Axis::Following => Inner::Following(Following::new(tree, id)),
            Axis::Preceding => Inner::Preceding(Preceding::new(tree, id)),
        };
        Ok(Self { inner })
    }
}

impl<'t, H: HostTree> Iterator for AxisIter<'t, H> {
    type Item = QueryNode<'t, H>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Single(node) => node.take(),
            Inner::Siblings(it) => it.next(),
            Inner::ReverseSiblings(it) => it.next(),
            Inner::Ancestors(it) => it.next(),
            Inner::Descendants(it) => it.next(),
            Inner::Following(it) => it.next(),
            Inner::Preceding(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Single(node) => {
                let n = usize::from(node.is_some());
                (n, Some(n))
            }
            Inner::Siblings(it) => it.size_hint(),
            Inner::ReverseSiblings(it) => it.size_hint(),
            _ => (0, None),
        }
    }
}

impl<'t, H: HostTree> FusedIterator for AxisIter<'t, H> {}
