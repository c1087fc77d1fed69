//! [`HostTree`] over the named nodes of a tree-sitter parse.
//!
//! Anonymous nodes (punctuation and keywords without a rule of their own)
//! are skipped, so kind names are the grammar's rule names such as
//! `function_item` or `identifier`.

use crate::host::HostTree;
use crate::ts::parser::ParsedSource;
use std::borrow::Cow;
use std::collections::HashSet;
use tree_sitter::{Node, Tree};

/// Rust grammar kinds whose nodes carry identifying text.
pub const RUST_TEXT_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "field_identifier",
    "shorthand_field_identifier",
    "primitive_type",
    "metavariable",
    "lifetime",
    "self",
    "super",
    "crate",
    "integer_literal",
    "float_literal",
    "boolean_literal",
    "char_literal",
    "string_literal",
    "raw_string_literal",
];

pub struct TsHost<'a> {
    source: &'a str,
    tree: &'a Tree,
    lines: Vec<&'a str>,
    text_kinds: HashSet<String>,
}

impl<'a> TsHost<'a> {
    pub fn new(parsed: &'a ParsedSource<'_>) -> Self {
        Self {
            source: parsed.source,
            tree: &parsed.tree,
            lines: parsed.source.lines().collect(),
            text_kinds: RUST_TEXT_KINDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Replace the kinds that carry a text attribute.
    pub fn with_text_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_kinds = kinds.into_iter().map(Into::into).collect();
        self
    }
}

impl<'a> HostTree for TsHost<'a> {
    type Node = Node<'a>;

    fn root(&self) -> Option<Node<'a>> {
        Some(self.tree.root_node())
    }

    fn kind(&self, node: Node<'a>) -> &str {
        node.kind()
    }

    fn text(&self, node: Node<'a>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    fn line(&self, node: Node<'a>) -> usize {
        node.start_position().row + 1
    }

    /// Character offset; tree-sitter reports byte columns.
    fn column(&self, node: Node<'a>) -> usize {
        let point = node.start_position();
        self.lines
            .get(point.row)
            .and_then(|line| line.get(..point.column))
            .map_or(point.column, |prefix| prefix.chars().count())
    }

    fn parent(&self, node: Node<'a>) -> Option<Node<'a>> {
        node.parent()
    }

    fn first_child(&self, node: Node<'a>) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        let first = node.named_children(&mut cursor).next();
        first
    }

    fn next_sibling(&self, node: Node<'a>) -> Option<Node<'a>> {
        node.next_named_sibling()
    }

    fn previous_sibling(&self, node: Node<'a>) -> Option<Node<'a>> {
        node.prev_named_sibling()
    }

    fn text_attribute(&self, node: Node<'a>) -> Option<Cow<'_, str>> {
        if !self.text_kinds.contains(node.kind()) {
            return None;
        }
        let text = self.text(node);
        let value = match node.kind() {
            "string_literal" | "raw_string_literal" => strip_quotes(text),
            _ => text,
        };
        Some(Cow::Borrowed(value))
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .copied()
    }
}

/// Content between the first and last double quote, e.g. `r#"x"#` -> `x`.
fn strip_quotes(text: &str) -> &str {
    match (text.find('"'), text.rfind('"')) {
        (Some(start), Some(end)) if start < end => &text[start + 1..end],
        _ => text,
    }
}
