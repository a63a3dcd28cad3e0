//! Recording engine for forestrecorder
//!
//! This crate ties the lower layers together:
//! - RecorderConfig: `forestrecorder.toml` loading and defaults
//! - Recorder: replay, validate, then append for each mutation command
//! - RecorderError: one error type with stable codes for every failure
//!
//! The engine holds no forest between calls. The action log is the only
//! state, and every command starts by replaying it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod recorder;

pub use error::{RecorderError, Result};
pub use recorder::{
    Clock, ConfigError, Recorder, RecorderConfig, CONFIG_ENV_VAR, CONFIG_FILE_NAME,
};
