//! Engine error type
//!
//! Unifies the errors of every layer a mutation command passes through, and
//! gives each one a stable code.

use std::io;

use forestrecorder_core::{ForestError, NodeIdError};
use forestrecorder_durability::ReplayError;

use crate::recorder::ConfigError;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RecorderError>;

/// Errors surfaced by [`Recorder`](crate::Recorder)
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    /// The requested mutation failed validation; nothing was appended
    #[error(transparent)]
    Forest(#[from] ForestError),

    /// The existing log could not be replayed
    #[error("cannot replay action log: {0}")]
    Replay(#[from] ReplayError),

    /// The mutation was valid but its record could not be appended
    #[error("failed to append to action log: {0}")]
    LogAppend(#[source] io::Error),

    /// A caller-supplied node id is invalid
    #[error("invalid node id: {0}")]
    InvalidNodeId(#[from] NodeIdError),

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RecorderError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            RecorderError::Forest(e) => e.code(),
            RecorderError::Replay(e) => e.code(),
            RecorderError::LogAppend(_) => "io",
            RecorderError::InvalidNodeId(_) => "invalid_node_id",
            RecorderError::Config(_) => "config",
        }
    }
}
