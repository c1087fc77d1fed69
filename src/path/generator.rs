use crate::config::GeneratorConfig;
use crate::host::{display_column, HostTree};
use crate::path::{encode_text, Location};

/// Generates canonical path queries for the host nodes at one location.
///
/// The generator reads the host tree directly; it does not need a
/// [`QueryTree`](crate::tree::QueryTree).
///
/// Each path is a sequence of `/kind` segments from the top-level node down
/// to the match. The last segment is disambiguated, in order of preference,
/// by the node's own text (`[@text='Foo']`), by the path to its first
/// text-carrying descendant (`[./IDENT[@text='foo']]`), or by its 1-based
/// position among same-kind siblings (`[2]`). Segments above it receive a
/// predicate only when a sibling of the same kind exists; they use their own
/// text, then a direct child's text, then their position.
pub struct PathQueryGenerator<'h, H: HostTree> {
    host: &'h H,
    location: Location,
    tab_width: usize,
}

impl<'h, H: HostTree> PathQueryGenerator<'h, H> {
    pub fn new(host: &'h H, location: Location) -> Self {
        Self {
            host,
            location,
            tab_width: crate::config::DEFAULT_TAB_WIDTH,
        }
    }

    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    pub fn with_config(self, config: &GeneratorConfig) -> Self {
        self.with_tab_width(config.tab_width)
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Path strings for every node at the location, in host traversal order.
    pub fn generate(&self) -> Vec<String> {
        let matches = self.matching_nodes();
        tracing::debug!(
            location = %self.location,
            matches = matches.len(),
            "generating path queries"
        );
        self.paths_for(&matches)
    }

    /// Path strings for nodes already found by [`Self::matching_nodes`], or
    /// for any other nodes of the same host.
    pub fn paths_for(&self, nodes: &[H::Node]) -> Vec<String> {
        nodes
            .iter()
            .map(|&node| {
                let path = self.path_between(None, node);
                tracing::trace!(?node, %path, "generated path query");
                path
            })
            .collect()
    }

    /// Host nodes starting at the location, in pre-order.
    ///
    /// The walk descends to the first child when there is one; otherwise it
    /// moves to the next sibling of the node or of its nearest ancestor that
    /// has one.
    pub fn matching_nodes(&self) -> Vec<H::Node> {
        let mut result = Vec::new();
        let mut current = self.host.root();
        while let Some(node) = current {
            if self.is_match(node) {
                result.push(node);
            }

            let mut next = self.host.first_child(node);
            let mut cursor = Some(node);
            while next.is_none() {
                let Some(c) = cursor else { break };
                next = self.host.next_sibling(c);
                cursor = self.host.parent(c);
            }
            current = next;
        }
        result
    }

    fn is_match(&self, node: H::Node) -> bool {
        self.host.line(node) == self.location.line
            && display_column(self.host, node, self.tab_width) == self.location.column
            && self
                .location
                .kind
                .as_deref()
                .map_or(true, |kind| self.host.kind(node) == kind)
    }

    /// Path from just below `anchor` (the top level when `None`) down to
    /// `target`.
    fn path_between(&self, anchor: Option<H::Node>, target: H::Node) -> String {
        let mut segments = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            if Some(node) == anchor {
                break;
            }
            let predicate = if node == target {
                self.target_predicate(node)
            } else {
                self.step_predicate(node, target)
            };
            segments.push(format!("/{}{}", self.host.kind(node), predicate));
            current = self.host.parent(node);
        }
        segments.reverse();
        segments.concat()
    }

    fn target_predicate(&self, node: H::Node) -> String {
        if let Some(text) = self.host.text_attribute(node) {
            return text_predicate(&text);
        }
        if let Some(descendant) = self.host.first_text_descendant(node) {
            return format!("[.{}]", self.path_between(Some(node), descendant));
        }
        if self.has_same_kind_sibling(node) {
            return format!("[{}]", self.position_among_siblings(node));
        }
        String::new()
    }

    fn step_predicate(&self, node: H::Node, target: H::Node) -> String {
        if !self.has_same_kind_sibling(node) {
            return String::new();
        }
        if let Some(text) = self.host.text_attribute(node) {
            return text_predicate(&text);
        }
        if let Some(child) = self.first_text_child(node).filter(|&c| c != target) {
            let text = self.host.text_attribute(child).unwrap_or_default();
            return format!("[./{}{}]", self.host.kind(child), text_predicate(&text));
        }
        format!("[{}]", self.position_among_siblings(node))
    }

    fn first_text_child(&self, node: H::Node) -> Option<H::Node> {
        let mut child = self.host.first_child(node);
        while let Some(c) = child {
            if self.host.has_text_attribute(c) {
                return Some(c);
            }
            child = self.host.next_sibling(c);
        }
        None
    }

    fn has_same_kind_sibling(&self, node: H::Node) -> bool {
        let kind = self.host.kind(node);
        let mut sibling = self.host.previous_sibling(node);
        while let Some(s) = sibling {
            if self.host.kind(s) == kind {
                return true;
            }
            sibling = self.host.previous_sibling(s);
        }
        let mut sibling = self.host.next_sibling(node);
        while let Some(s) = sibling {
            if self.host.kind(s) == kind {
                return true;
            }
            sibling = self.host.next_sibling(s);
        }
        false
    }

    /// Number of same-kind siblings up to and including `node`.
    fn position_among_siblings(&self, node: H::Node) -> usize {
        let kind = self.host.kind(node);
        let mut position = 1;
        let mut sibling = self.host.previous_sibling(node);
        while let Some(s) = sibling {
            if self.host.kind(s) == kind {
                position += 1;
            }
            sibling = self.host.previous_sibling(s);
        }
        position
    }
}

fn text_predicate(text: &str) -> String {
    format!("[@text='{}']", encode_text(text))
}
