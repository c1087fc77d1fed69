use crate::tree::NodeKind;
use thiserror::Error;

/// Caller-contract violations raised by the query tree and the axis engine.
///
/// Both variants belong to the "unsupported operation" class: the call is
/// structurally invalid for the node it was made on. The tree itself is
/// never modified by a failed call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("operation `{operation}` is not supported on {kind} nodes")]
    UnsupportedOperation {
        operation: &'static str,
        kind: NodeKind,
    },

    #[error("unsupported axis identifier: {name}")]
    UnsupportedAxis { name: String },
}

impl QueryError {
    pub(crate) fn unsupported(operation: &'static str, kind: NodeKind) -> Self {
        QueryError::UnsupportedOperation { operation, kind }
    }

    /// True for every variant; kept so callers can match on the class
    /// rather than on individual variants.
    pub fn is_unsupported_operation(&self) -> bool {
        matches!(
            self,
            QueryError::UnsupportedOperation { .. } | QueryError::UnsupportedAxis { .. }
        )
    }
}
