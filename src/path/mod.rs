//! Canonical path queries for source locations.
//!
//! Given a line, a column and optionally a node kind, the
//! [`PathQueryGenerator`] finds every host node starting there and renders
//! for each one a root-to-node path such as
//! `/CLASS_DEF/OBJBLOCK/METHOD_DEF[./IDENT[@text='run']]`. The strings are stable
//! across runs and precise enough to relocate the node later, which makes
//! them suitable as persisted suppression identifiers.

mod generator;

pub use generator::PathQueryGenerator;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target of a path query: a 1-based line, a 1-based tab-expanded column,
/// and an optional kind filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub kind: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("expected `line:column`, got `{0}`")]
    Malformed(String),

    #[error("invalid number `{value}` in location")]
    InvalidNumber { value: String },

    #[error("line and column are 1-based, got {line}:{column}")]
    ZeroPosition { line: usize, column: usize },
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            kind: None,
        }
    }

    /// Restrict matches to nodes of `kind`.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Parse `line:column`.
    pub fn parse(s: &str) -> Result<Self, LocationError> {
        let (line, column) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| LocationError::Malformed(s.to_string()))?;
        let number = |value: &str| {
            value
                .trim()
                .parse::<usize>()
                .map_err(|_| LocationError::InvalidNumber {
                    value: value.to_string(),
                })
        };
        let (line, column) = (number(line)?, number(column)?);
        if line == 0 || column == 0 {
            return Err(LocationError::ZeroPosition { line, column });
        }
        Ok(Self::new(line, column))
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)?;
        if let Some(kind) = &self.kind {
            write!(f, " ({kind})")?;
        }
        Ok(())
    }
}

/// Escape a text attribute value for use inside `[@text='...']`.
pub fn encode_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
