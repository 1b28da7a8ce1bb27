//! Error types for tree edits and document loading.

use crate::id::NodeId;
use crate::validate::TreeDiagnostic;
use thiserror::Error;

/// Why an edit was refused. A refused edit never changes the tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("no parent to insert beside {0}")]
    ParentNotFound(NodeId),

    #[error("cannot drop a node onto itself")]
    SelfDrop,

    #[error("cannot drop {active} into its own descendant {target}")]
    DescendantDrop { active: NodeId, target: NodeId },

    #[error("the root node cannot be moved")]
    RootNotDraggable,

    #[error("{0} cannot accept children")]
    NotAContainer(NodeId),

    #[error("{0} is not a text node")]
    NotTextNode(NodeId),

    #[error("tree invariant violated: {0}")]
    Invariant(String),
}

/// Coarse classification of a `TreeError`, used to pick a log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// An id did not resolve. Expected when events race a newer tree version.
    LookupFailure,
    /// The edit is structurally illegal (cycle, root move, non-container target).
    InvalidMove,
    /// Should be unreachable for a well-formed tree.
    InvariantViolation,
}

impl TreeError {
    pub fn class(&self) -> ErrorClass {
        match self {
            TreeError::NodeNotFound(_) | TreeError::ParentNotFound(_) => ErrorClass::LookupFailure,
            TreeError::SelfDrop
            | TreeError::DescendantDrop { .. }
            | TreeError::RootNotDraggable
            | TreeError::NotAContainer(_)
            | TreeError::NotTextNode(_) => ErrorClass::InvalidMove,
            TreeError::Invariant(_) => ErrorClass::InvariantViolation,
        }
    }
}

/// Failure to load a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document failed validation with {} error(s)", .diagnostics.len())]
    Invalid { diagnostics: Vec<TreeDiagnostic> },
}
