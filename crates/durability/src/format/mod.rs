//! On-disk formats
//!
//! - `action_record`: tab-delimited, line-oriented action log records

pub mod action_record;

pub use action_record::{
    Action, ActionKind, ActionRecord, RecordError, FIELD_SEPARATOR, HEADER_FIELDS, RECURSIVE_FLAG,
};
