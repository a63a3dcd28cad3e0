//! Integration tests for the recording engine.
//!
//! These go through `Recorder` and a real log file: every command replays the
//! log, applies one mutation, and appends. Unit tests in the crates cover the
//! forest rules, the record codec and replay in isolation.

#[path = "../common/mod.rs"]
mod common;

mod log_format;
mod read_purity;
mod replay_equivalence;
mod replay_failures;
mod scenario;
