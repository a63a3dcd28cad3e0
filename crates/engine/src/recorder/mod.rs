//! Recorder: the mutation command surface
//!
//! Every command follows the same flow:
//!
//! 1. Replay the log into a fresh forest
//! 2. Apply the requested mutation to that forest
//! 3. Only if it succeeds, append one record to the log
//!
//! A rejected mutation therefore never touches the log, and the in-memory
//! forest is discarded when the command returns.

pub mod config;

pub use config::{ConfigError, RecorderConfig, CONFIG_ENV_VAR, CONFIG_FILE_NAME};

use forestrecorder_core::{Forest, NodeId, Parent, Subtree};
use forestrecorder_durability::{Action, ActionLog, ActionRecord, LogReplayer, ReplayStats};
use tracing::{debug, info};

use crate::error::{RecorderError, Result};

/// Source of record timestamps, in seconds since the unix epoch
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Records forest mutations into an action log
#[derive(Debug, Clone)]
pub struct Recorder {
    config: RecorderConfig,
    log: ActionLog,
    clock: Clock,
}

impl Recorder {
    /// Open a recorder for the given configuration
    ///
    /// The log file is not touched until the first successful mutation.
    pub fn open(config: RecorderConfig) -> Result<Self> {
        config.validate()?;
        let durability = config.durability_mode()?;
        let log = ActionLog::new(config.log.clone(), durability);
        info!(
            log = %log.path().display(),
            timezone = %config.timezone,
            durability = %durability,
            "opened recorder"
        );
        Ok(Recorder {
            config,
            log,
            clock: system_clock,
        })
    }

    /// Replace the clock used to stamp new records
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Underlying action log
    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Materialize the current forest from the log
    pub fn replay(&self) -> Result<Forest> {
        Ok(self.replay_with_stats()?.0)
    }

    /// Materialize the current forest along with replay statistics
    pub fn replay_with_stats(&self) -> Result<(Forest, ReplayStats)> {
        let replayer = LogReplayer::new(self.log.clone());
        Ok(replayer.replay()?)
    }

    /// Record the creation of `node` under `parent`, adopting `children`
    pub fn add(
        &self,
        node: NodeId,
        parent: Parent,
        children: Vec<NodeId>,
    ) -> Result<ActionRecord> {
        self.apply(Action::Add {
            node,
            parent,
            children,
        })
    }

    /// Record moving `node` under `parent`, adopting `children`
    pub fn move_node(
        &self,
        node: NodeId,
        parent: Parent,
        children: Vec<NodeId>,
    ) -> Result<ActionRecord> {
        self.apply(Action::Move {
            node,
            parent,
            children,
        })
    }

    /// Record removing `node`, with its whole subtree when `recursive`
    pub fn remove(&self, node: NodeId, recursive: bool) -> Result<ActionRecord> {
        self.apply(Action::Remove { node, recursive })
    }

    /// Validate `action` against the replayed forest and append it
    ///
    /// Returns the record that was written.
    pub fn apply(&self, action: Action) -> Result<ActionRecord> {
        let mut forest = self.replay()?;
        if let Err(e) = action.apply(&mut forest) {
            debug!(action = %action.kind(), node = %action.node(), error = %e, "mutation rejected");
            return Err(e.into());
        }

        let record = ActionRecord::new((self.clock)(), self.config.timezone.clone(), action);
        self.log.append(&record).map_err(RecorderError::LogAppend)?;

        info!(
            action = %record.action.kind(),
            node = %record.action.node(),
            nodes = forest.len(),
            "recorded action"
        );
        Ok(record)
    }

    /// Every record in the log, in line order
    pub fn history(&self) -> Result<Vec<ActionRecord>> {
        self.log
            .read_all()
            .map_err(|e| RecorderError::Replay(e.into()))
    }

    /// Export of the current forest
    pub fn dump(&self) -> Result<Subtree> {
        Ok(self.replay()?.export())
    }
}
