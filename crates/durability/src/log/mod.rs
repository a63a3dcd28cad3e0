//! Append-only action log
//!
//! The log is a single text file holding one encoded [`ActionRecord`] per
//! line. It is the only durable state: the forest is rebuilt from it on every
//! run.
//!
//! - `mode`: durability modes (Always, Standard)
//! - `reader`: streaming record reader

pub mod mode;
pub mod reader;

pub use mode::{DurabilityMode, ParseDurabilityError};
pub use reader::{LogReadError, RecordReader};

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::format::ActionRecord;

/// Handle on the action log file
///
/// Appends never rewrite or truncate existing bytes. The file is opened for
/// each operation, so a handle holds no OS resources.
#[derive(Debug, Clone)]
pub struct ActionLog {
    path: PathBuf,
    durability: DurabilityMode,
}

impl ActionLog {
    /// Create a handle for the log at `path`
    pub fn new(path: impl Into<PathBuf>, durability: DurabilityMode) -> Self {
        ActionLog {
            path: path.into(),
            durability,
        }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durability mode applied to appends
    pub fn durability(&self) -> DurabilityMode {
        self.durability
    }

    /// Whether the log file exists yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one record after the records already present
    ///
    /// Returns the number of bytes written. Under [`DurabilityMode::Always`]
    /// the data is fsynced before this returns. Missing parent directories
    /// are created. If the last existing line is unterminated, a newline is
    /// written ahead of the record so the two never share a line.
    pub fn append(&self, record: &ActionRecord) -> io::Result<u64> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut line = String::new();
        if !ends_with_newline(&mut file)? {
            line.push('\n');
        }
        line.push_str(&record.encode());
        line.push('\n');

        file.write_all(line.as_bytes())?;
        file.flush()?;
        if self.durability.requires_immediate_fsync() {
            file.sync_all()?;
        }

        debug!(
            path = %self.path.display(),
            action = %record.action.kind(),
            node = %record.action.node(),
            bytes = line.len(),
            "appended action record"
        );
        Ok(line.len() as u64)
    }

    /// Stream the records in file order
    ///
    /// A log file that does not exist yet reads as empty.
    pub fn records(&self) -> io::Result<RecordReader<Box<dyn BufRead>>> {
        let source: Box<dyn BufRead> = match File::open(&self.path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Box::new(io::empty()),
            Err(e) => return Err(e),
        };
        Ok(RecordReader::new(source))
    }

    /// Read and decode every record
    pub fn read_all(&self) -> Result<Vec<ActionRecord>, LogReadError> {
        self.records()?
            .map(|item| item.map(|(_, record)| record))
            .collect()
    }
}

/// Whether the file is empty or its last byte is `\n`
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
