//! Core types for forestrecorder
//!
//! This crate defines the in-memory side of the system:
//! - NodeId / Parent: validated node names and parent references
//! - Forest: node index with add/move/remove mutations
//! - Locator: read view of one position (ancestors, children, export)
//! - Subtree: nested export representation
//! - ForestError: validation failures, each with a stable code

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod forest;
pub mod node;
pub mod subtree;

pub use error::{ForestError, InvariantViolation, Result};
pub use forest::{Forest, Locator};
pub use node::{NodeId, NodeIdError, Parent};
pub use subtree::Subtree;
