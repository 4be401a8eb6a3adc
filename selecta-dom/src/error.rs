use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by [`Document`](crate::Document) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The node was removed or never existed.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The node has no parent to insert relative to.
    #[error("node {0} is detached")]
    Detached(NodeId),

    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    /// The current text selection cannot be cleared (hidden or restricted range).
    #[error("text selection is locked")]
    SelectionLocked,
}
