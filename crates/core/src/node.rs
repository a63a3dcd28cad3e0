//! Node identifiers and parent references
//!
//! Nodes are addressed by user-chosen names. The top of the forest is an
//! implicit root sentinel that has no name of its own; it is addressed as
//! [`Parent::Root`] wherever a parent is expected.
//!
//! ## Validation
//!
//! Node ids must:
//! - Be non-empty
//! - Not contain a tab, carriage return or newline (the action log is
//!   tab-delimited and line-oriented)

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique, user-chosen name of a forest node
///
/// Uniqueness is enforced by the [`Forest`](crate::Forest), not by this type.
/// A name becomes available again once its node has been removed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct NodeId(String);

/// Error when validating a node id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeIdError {
    /// Id is empty (the empty string is reserved for the root sentinel)
    Empty,
    /// Id contains a character that cannot be stored in the action log
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position of the invalid character
        position: usize,
    },
}

impl fmt::Display for NodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeIdError::Empty => write!(f, "node id cannot be empty"),
            NodeIdError::InvalidChar { char, position } => write!(
                f,
                "invalid character {:?} at position {} (tabs and line breaks are not allowed)",
                char, position
            ),
        }
    }
}

impl std::error::Error for NodeIdError {}

impl NodeId {
    /// Create a new NodeId, validating the input
    ///
    /// # Errors
    ///
    /// Returns `NodeIdError` if the id is empty or contains a tab or line break.
    pub fn new(id: impl Into<String>) -> Result<Self, NodeIdError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(NodeId(id))
    }

    /// Validate a node id
    pub fn validate(id: &str) -> Result<(), NodeIdError> {
        if id.is_empty() {
            return Err(NodeIdError::Empty);
        }

        for (pos, ch) in id.chars().enumerate() {
            if matches!(ch, '\t' | '\r' | '\n') {
                return Err(NodeIdError::InvalidChar {
                    char: ch,
                    position: pos,
                });
            }
        }

        Ok(())
    }

    /// Get the id as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NodeId {
    type Error = NodeIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        NodeId::new(value)
    }
}

impl TryFrom<&str> for NodeId {
    type Error = NodeIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        NodeId::new(value)
    }
}

/// Where a node hangs: directly under the root sentinel, or under a named node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Parent {
    /// The implicit root sentinel at the top of the forest
    Root,
    /// A named node
    Node(NodeId),
}

impl Parent {
    /// Parse a parent field, where the empty string denotes the root
    pub fn parse(field: &str) -> Result<Self, NodeIdError> {
        if field.is_empty() {
            Ok(Parent::Root)
        } else {
            NodeId::new(field).map(Parent::Node)
        }
    }

    /// The named node, or `None` for the root
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            Parent::Root => None,
            Parent::Node(id) => Some(id),
        }
    }

    /// Whether this is the root sentinel
    pub fn is_root(&self) -> bool {
        matches!(self, Parent::Root)
    }

    /// The log field for this parent (empty for the root)
    pub fn as_field(&self) -> &str {
        match self {
            Parent::Root => "",
            Parent::Node(id) => id.as_str(),
        }
    }
}

impl From<NodeId> for Parent {
    fn from(id: NodeId) -> Self {
        Parent::Node(id)
    }
}

impl From<Option<NodeId>> for Parent {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(Parent::Root, Parent::Node)
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Root => f.write_str("(root)"),
            Parent::Node(id) => write!(f, "{}", id),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
