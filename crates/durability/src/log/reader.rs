//! Action log reader.
//!
//! Streams decoded records in file order, one per line, and reports the
//! 1-based line number alongside each record so callers can point at the
//! exact line on failure.

use std::io::{self, BufRead, Lines};

use crate::format::{ActionRecord, RecordError};

/// Iterator over the records of an action log
pub struct RecordReader<R> {
    lines: Lines<R>,
    line: usize,
    failed: bool,
}

impl<R: BufRead> RecordReader<R> {
    /// Wrap a buffered byte source
    pub fn new(source: R) -> Self {
        RecordReader {
            lines: source.lines(),
            line: 0,
            failed: false,
        }
    }

    /// Line number of the most recently yielded record
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<(usize, ActionRecord), LogReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        // Nothing after the first error is trustworthy.
        if self.failed {
            return None;
        }
        let raw = self.lines.next()?;
        self.line += 1;
        let line = self.line;

        let result = raw
            .map_err(LogReadError::Io)
            .and_then(|text| {
                ActionRecord::decode(&text).map_err(|source| LogReadError::Record { line, source })
            })
            .map(|record| (line, record));
        self.failed = result.is_err();
        Some(result)
    }
}

/// Errors reading the action log
#[derive(Debug, thiserror::Error)]
pub enum LogReadError {
    /// IO error (includes lines that are not valid UTF-8)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line could not be decoded
    #[error("line {line}: {source}")]
    Record {
        /// 1-based line number
        line: usize,
        /// Decoding failure
        source: RecordError,
    },
}
