//! Integration suite for the query tree, the axis engine and the path
//! generator, run against both host implementations.


mod axes;
mod generator;
mod order;
mod tree_sitter;
