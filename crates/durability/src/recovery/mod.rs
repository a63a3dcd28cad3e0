//! Forest recovery from the action log
//!
//! - `replayer`: All-or-nothing replay of the action log into a fresh forest

pub mod replayer;

pub use replayer::{replay_from, replay_records, LogReplayer, ReplayError, ReplayStats};
