//! ast-xpath: XPath-style navigation over parsed syntax trees
//!
//! Wraps an arbitrary host syntax tree in a read-only query tree that
//! path-query engines can walk, and generates canonical path strings that
//! identify the nodes found at a given source location.
//!
//! # Architecture
//!
//! Hosts plug in through the [`HostTree`] trait. The crate ships two:
//! [`SyntaxTree`], an in-memory arena built programmatically, and
//! [`TsHost`], the named nodes of a tree-sitter parse of Rust source.
//!
//! - [`QueryTree`] wraps every host node once and hands out [`QueryNode`]
//!   handles (document, element or attribute).
//! - [`Axis`] enumerates the twelve navigation directions; every axis is a
//!   lazy, non-recursive [`AxisIter`].
//! - [`sort_in_order`] orders handles the way the engine expects.
//! - [`PathQueryGenerator`] renders a stable path such as
//!   `/CLASS_DEF/OBJBLOCK/METHOD_DEF[./IDENT[@text='run']]` for each node at a
//!   [`Location`].
//!
//! # Example
//!
//! ```
//! use ast_xpath::{Axis, Location, PathQueryGenerator, QueryTree, SyntaxTree};
//!
//! let mut builder = SyntaxTree::builder().text_kinds(["IDENT"]);
//! let class = builder.root("CLASS_DEF", "", 1, 0);
//! let block = builder.child(class, "OBJBLOCK", "", 1, 10);
//! let run = builder.child(block, "METHOD_DEF", "", 2, 4);
//! builder.child(run, "IDENT", "run", 2, 11);
//! let stop = builder.child(block, "METHOD_DEF", "", 3, 4);
//! builder.child(stop, "IDENT", "stop", 3, 11);
//! let host = builder.build();
//!
//! let paths = PathQueryGenerator::new(&host, Location::new(2, 5)).generate();
//! assert_eq!(paths, ["/CLASS_DEF/OBJBLOCK/METHOD_DEF[./IDENT[@text='run']]"]);
//!
//! let tree = QueryTree::new(&host);
//! let texts: Vec<_> = tree
//!     .document()
//!     .axis(Axis::Descendant)
//!     .unwrap()
//!     .filter_map(|node| node.text_value())
//!     .collect();
//! assert_eq!(texts, ["run", "stop"]);
//! ```

pub mod axis;
pub mod config;
pub mod error;
pub mod host;
pub mod path;
pub mod tree;
pub mod ts;

// Re-exports
pub use axis::{Axis, AxisIter, Children};
pub use config::{load_from_path, load_from_str, ConfigError, GeneratorConfig};
pub use error::QueryError;
pub use host::{display_column, expanded_width, HostTree, NodeId, SyntaxTree, SyntaxTreeBuilder};
pub use path::{encode_text, Location, LocationError, PathQueryGenerator};
pub use tree::{sort_in_order, NodeKind, QueryNode, QueryTree};
pub use ts::{RustParser, TreeSitterError, TsHost};
