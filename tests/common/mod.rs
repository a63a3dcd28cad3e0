//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub use forestrecorder::{
    Action, ActionRecord, DurabilityMode, Forest, NodeId, Parent, Recorder, RecorderConfig,
    Subtree,
};
use tempfile::TempDir;

/// Timestamp stamped on every record written through [`TestRecorder`].
pub const FIXED_TIME: i64 = 1_700_000_000;

fn fixed_clock() -> i64 {
    FIXED_TIME
}

// ============================================================================
// TestRecorder - recorder over a throwaway log
// ============================================================================

/// Recorder over a log in its own temporary directory.
pub struct TestRecorder {
    pub recorder: Recorder,
    pub dir: TempDir,
}

impl TestRecorder {
    /// Standard durability keeps the suites fast.
    pub fn new() -> Self {
        Self::with_durability(DurabilityMode::Standard)
    }

    /// fsync on every append.
    pub fn new_strict() -> Self {
        Self::with_durability(DurabilityMode::Always)
    }

    fn with_durability(mode: DurabilityMode) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let recorder = open(dir.path().join("forest.log"), mode);
        TestRecorder { recorder, dir }
    }

    pub fn log_path(&self) -> PathBuf {
        self.recorder.log().path().to_path_buf()
    }

    /// Raw log bytes; empty if nothing was recorded yet.
    pub fn log_bytes(&self) -> Vec<u8> {
        fs::read(self.log_path()).unwrap_or_default()
    }

    pub fn log_text(&self) -> String {
        String::from_utf8(self.log_bytes()).expect("log is UTF-8")
    }

    /// Drop the recorder and open a fresh one over the same log.
    pub fn reopen(&mut self) {
        let mode = self.recorder.log().durability();
        self.recorder = open(self.log_path(), mode);
    }

    pub fn forest(&self) -> Forest {
        self.recorder.replay().expect("replay")
    }

    pub fn dump(&self) -> Subtree {
        self.recorder.dump().expect("dump")
    }

    /// Write raw log content, replacing whatever is there.
    pub fn write_log(&self, content: &str) {
        fs::write(self.log_path(), content).expect("write log");
    }
}

impl Default for TestRecorder {
    fn default() -> Self {
        Self::new()
    }
}

fn open(log: impl AsRef<Path>, mode: DurabilityMode) -> Recorder {
    let config = RecorderConfig::for_log(log.as_ref())
        .with_timezone("UTC")
        .with_durability(mode);
    Recorder::open(config)
        .expect("open recorder")
        .with_clock(fixed_clock)
}

// ============================================================================
// Builders
// ============================================================================

pub fn id(s: &str) -> NodeId {
    NodeId::new(s).expect("valid node id")
}

pub fn ids(names: &[&str]) -> Vec<NodeId> {
    names.iter().map(|s| id(s)).collect()
}

pub fn under(parent: &str) -> Parent {
    Parent::Node(id(parent))
}

/// Build an expected export from JSON, e.g. `tree(json!({"a": {}}))`.
pub fn tree(value: serde_json::Value) -> Subtree {
    serde_json::from_value(value).expect("valid export JSON")
}

pub fn add(node: &str, parent: Parent, children: &[&str]) -> Action {
    Action::Add {
        node: id(node),
        parent,
        children: ids(children),
    }
}

pub fn mv(node: &str, parent: Parent, children: &[&str]) -> Action {
    Action::Move {
        node: id(node),
        parent,
        children: ids(children),
    }
}

pub fn remove(node: &str, recursive: bool) -> Action {
    Action::Remove {
        node: id(node),
        recursive,
    }
}

/// Apply actions in order to a fresh forest, panicking on the first failure.
pub fn forest_of(actions: &[Action]) -> Forest {
    let mut forest = Forest::new();
    for action in actions {
        action
            .apply(&mut forest)
            .unwrap_or_else(|e| panic!("{:?} failed: {}", action, e));
    }
    forest
}

/// Encode actions as log text, one line each.
pub fn log_of(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|a| format!("{}\n", ActionRecord::new(FIXED_TIME, "UTC", a.clone()).encode()))
        .collect()
}
