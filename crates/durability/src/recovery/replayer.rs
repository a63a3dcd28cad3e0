//! Action log replay
//!
//! Rebuilds the forest by applying every log record, in line order, to a
//! forest that starts out holding only the root sentinel.
//!
//! # Replay Properties
//!
//! - **Deterministic**: Same log always produces the same forest
//! - **Ordered**: Records are applied in line order; timestamps are ignored
//! - **All or nothing**: The first bad record aborts replay and the
//!   partially built forest is dropped, never returned
//!
//! # Usage
//!
//! ```ignore
//! let replayer = LogReplayer::new(log);
//! let (forest, stats) = replayer.replay()?;
//! ```

use std::io::{self, BufRead};

use forestrecorder_core::{Forest, ForestError};
use tracing::{debug, info, warn};

use crate::format::{ActionKind, ActionRecord, RecordError};
use crate::log::{ActionLog, LogReadError, RecordReader};

/// Replay engine for an [`ActionLog`]
pub struct LogReplayer {
    log: ActionLog,
}

impl LogReplayer {
    /// Create a replayer over a log
    pub fn new(log: ActionLog) -> Self {
        LogReplayer { log }
    }

    /// The log being replayed
    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Replay the whole log into a fresh forest
    pub fn replay(&self) -> Result<(Forest, ReplayStats), ReplayError> {
        let records = self.log.records()?;
        let result = replay_records(records);
        match &result {
            Ok((forest, stats)) => info!(
                path = %self.log.path().display(),
                records = stats.records_applied,
                nodes = forest.len(),
                "replayed action log"
            ),
            Err(e) => warn!(path = %self.log.path().display(), error = %e, "action log replay failed"),
        }
        result
    }
}

/// Replay records from any buffered byte source
pub fn replay_from<R: BufRead>(source: R) -> Result<(Forest, ReplayStats), ReplayError> {
    replay_records(RecordReader::new(source))
}

/// Replay already-read records, in iteration order
///
/// Stops at the first read, decode or apply failure.
pub fn replay_records<I>(records: I) -> Result<(Forest, ReplayStats), ReplayError>
where
    I: IntoIterator<Item = Result<(usize, ActionRecord), LogReadError>>,
{
    let mut forest = Forest::new();
    let mut stats = ReplayStats::default();

    for item in records {
        let (line, record) = item?;
        stats.records_read += 1;

        record
            .action
            .apply(&mut forest)
            .map_err(|source| ReplayError::Forest { line, source })?;
        stats.count(record.action.kind());

        debug!(
            line,
            action = %record.action.kind(),
            node = %record.action.node(),
            "applied action record"
        );
    }

    Ok((forest, stats))
}

/// Statistics from a replay
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayStats {
    /// Total number of records read
    pub records_read: usize,
    /// Records successfully applied
    pub records_applied: usize,
    /// Applied add records
    pub adds: usize,
    /// Applied move records
    pub moves: usize,
    /// Applied remove records
    pub removes: usize,
}

impl ReplayStats {
    /// Create empty stats
    pub fn new() -> Self {
        ReplayStats::default()
    }

    /// Check if any records were applied
    pub fn has_records(&self) -> bool {
        self.records_applied > 0
    }

    fn count(&mut self, kind: ActionKind) {
        self.records_applied += 1;
        match kind {
            ActionKind::Add => self.adds += 1,
            ActionKind::Move => self.moves += 1,
            ActionKind::Remove => self.removes += 1,
        }
    }
}

/// Replay errors
///
/// Any of these means no forest was produced.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// IO error reading the log
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A record could not be decoded
    #[error("invalid action on line {line}: {source}")]
    InvalidAction {
        /// 1-based line number
        line: usize,
        /// Decoding failure
        source: RecordError,
    },

    /// A record violated the forest's preconditions
    #[error("line {line}: {source}")]
    Forest {
        /// 1-based line number
        line: usize,
        /// Rejected mutation
        source: ForestError,
    },
}

impl From<LogReadError> for ReplayError {
    fn from(e: LogReadError) -> Self {
        match e {
            LogReadError::Io(e) => ReplayError::Io(e),
            LogReadError::Record { line, source } => ReplayError::InvalidAction { line, source },
        }
    }
}

impl ReplayError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ReplayError::Io(_) => "io",
            ReplayError::InvalidAction { .. } => "invalid_action",
            ReplayError::Forest { source, .. } => source.code(),
        }
    }

    /// Line of the offending record, if the failure is tied to one
    pub fn line(&self) -> Option<usize> {
        match self {
            ReplayError::Io(_) => None,
            ReplayError::InvalidAction { line, .. } | ReplayError::Forest { line, .. } => {
                Some(*line)
            }
        }
    }
}
