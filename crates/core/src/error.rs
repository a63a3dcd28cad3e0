//! Error types for forest mutations
//!
//! Every variant corresponds to a precondition checked before the forest is
//! touched, so an error always means the forest is unchanged.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::node::{NodeId, Parent};
use thiserror::Error;

/// Result type alias for forest operations
pub type Result<T> = std::result::Result<T, ForestError>;

/// Validation failures raised by [`Forest`](crate::Forest) mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestError {
    /// Add target already present
    #[error("cannot add {node}: node already exists")]
    AddExisting {
        /// Node that was being added
        node: NodeId,
    },

    /// Referenced parent is absent from the forest
    #[error("parent {parent} does not exist")]
    NonexistingParent {
        /// Missing parent
        parent: NodeId,
    },

    /// A listed child is not currently a direct child of the relevant parent
    #[error("{child} is not a child of {parent}")]
    InvalidChild {
        /// Offending child
        child: NodeId,
        /// Parent the child was expected under
        parent: Parent,
    },

    /// Move target absent
    #[error("cannot move {node}: node does not exist")]
    MoveNonexisting {
        /// Node that was being moved
        node: NodeId,
    },

    /// Remove target absent
    #[error("cannot remove {node}: node does not exist")]
    RemoveNonexisting {
        /// Node that was being removed
        node: NodeId,
    },

    /// Move would place a node underneath itself
    #[error("cannot move {node} under {parent}: {parent} is {node} or one of its descendants")]
    CyclicMove {
        /// Node that was being moved
        node: NodeId,
        /// Requested new parent
        parent: NodeId,
    },
}

impl ForestError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ForestError::AddExisting { .. } => "add_existing",
            ForestError::NonexistingParent { .. } => "nonexisting_parent",
            ForestError::InvalidChild { .. } => "invalid_child",
            ForestError::MoveNonexisting { .. } => "move_nonexisting",
            ForestError::RemoveNonexisting { .. } => "remove_nonexisting",
            ForestError::CyclicMove { .. } => "cyclic_move",
        }
    }
}

/// Structural inconsistency found by [`Forest::check_invariants`](crate::Forest::check_invariants)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("forest invariant violated: {0}")]
pub struct InvariantViolation(pub String);
