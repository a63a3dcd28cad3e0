//! Durability layer for forestrecorder
//!
//! This crate handles everything that touches disk:
//!
//! - Format: tab-delimited action records, one per line
//! - Log: append-only action log with durability modes (Always, Standard)
//! - Recovery: replay of the action log into a fresh forest

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod format; // Action record codec
pub mod log; // Append-only action log
pub mod recovery; // Log replay

// === Re-exports ===
pub use format::{Action, ActionKind, ActionRecord, RecordError};
pub use log::{ActionLog, DurabilityMode, LogReadError, ParseDurabilityError, RecordReader};
pub use recovery::{replay_from, replay_records, LogReplayer, ReplayError, ReplayStats};
