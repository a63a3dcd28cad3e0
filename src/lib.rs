//! forestrecorder - a forest of named nodes materialized from an action log
//!
//! Every mutation (add, move, remove) is validated against the current forest
//! and then appended as one tab-delimited line to an append-only log. The
//! forest itself is never stored: it is rebuilt by replaying the log.
//!
//! # Quick Start
//!
//! ```ignore
//! use forestrecorder::{NodeId, Parent, Recorder, RecorderConfig};
//!
//! let recorder = Recorder::open(RecorderConfig::for_log("forest.log"))?;
//! recorder.add(NodeId::new("a")?, Parent::Root, vec![])?;
//! recorder.add(NodeId::new("b")?, Parent::Node(NodeId::new("a")?), vec![])?;
//!
//! let tree = recorder.dump()?; // {"a": {"b": {}}}
//! ```
//!
//! # Architecture
//!
//! - `forestrecorder-core`: the in-memory [`Forest`] and its validation rules
//! - `forestrecorder-durability`: record codec, [`ActionLog`], replay
//! - `forestrecorder-engine`: [`Recorder`], configuration, unified errors

pub use forestrecorder_core::{
    Forest, ForestError, InvariantViolation, Locator, NodeId, NodeIdError, Parent, Subtree,
};
pub use forestrecorder_durability::{
    replay_from, replay_records, Action, ActionKind, ActionLog, ActionRecord, DurabilityMode,
    LogReadError, LogReplayer, RecordError, ReplayError, ReplayStats,
};
pub use forestrecorder_engine::{
    ConfigError, Recorder, RecorderConfig, RecorderError, CONFIG_ENV_VAR, CONFIG_FILE_NAME,
};
