//! Tree-sitter host trees for Rust source.
//!
//! Parses Rust with the grammar bundled by ast-grep-language and exposes the
//! named nodes of the resulting tree as a [`HostTree`](crate::host::HostTree),
//! so the query tree and the path generator work on real source files.

pub mod errors;
pub mod host;
pub mod parser;

pub use errors::TreeSitterError;
pub use host::{TsHost, RUST_TEXT_KINDS};
pub use parser::{read_source, ErrorNode, ParsedSource, RustParser};
