//! Action log record format.
//!
//! One record per line, fields separated by a tab character.
//!
//! # Record Layout
//!
//! ```text
//! ┌────────────────┬──────────┬────────┬─────────┬───────────────────────────┐
//! │ Unix seconds   │ Timezone │ Action │ Node id │ Arguments (variable)      │
//! └────────────────┴──────────┴────────┴─────────┴───────────────────────────┘
//!
//! add / move:  <parent-id> <child-id>*      (empty parent-id = root)
//! remove:      [<recursive-flag>]           (non-empty = recursive)
//! ```
//!
//! The timestamp and timezone are descriptive only. Replay order is line order.

use std::fmt;

use chrono::{DateTime, Utc};
use forestrecorder_core::{Forest, NodeId, NodeIdError, Parent};

/// Separator between fields of a record
pub const FIELD_SEPARATOR: char = '\t';

/// Value written in the trailing field of a recursive remove
pub const RECURSIVE_FLAG: &str = "recursive";

/// Number of fields every record starts with (timestamp, timezone, action, node)
pub const HEADER_FIELDS: usize = 4;

/// Kind of mutation a record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Node creation
    Add,
    /// Node relocation
    Move,
    /// Node removal
    Remove,
}

impl ActionKind {
    /// Keyword used on disk
    pub fn keyword(&self) -> &'static str {
        match self {
            ActionKind::Add => "add",
            ActionKind::Move => "move",
            ActionKind::Remove => "remove",
        }
    }

    /// Parse an on-disk keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "add" => Some(ActionKind::Add),
            "move" => Some(ActionKind::Move),
            "remove" => Some(ActionKind::Remove),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single forest mutation with strongly typed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create `node` under `parent`, adopting `children` of `parent`
    Add {
        /// Node to create
        node: NodeId,
        /// Parent to create it under
        parent: Parent,
        /// Direct children of `parent` to adopt
        children: Vec<NodeId>,
    },
    /// Re-parent `node` under `parent`, adopting `children` of `parent`
    Move {
        /// Node to relocate
        node: NodeId,
        /// Destination parent
        parent: Parent,
        /// Direct children of the destination to adopt
        children: Vec<NodeId>,
    },
    /// Remove `node`, with its subtree when `recursive`
    Remove {
        /// Node to remove
        node: NodeId,
        /// Remove the whole subtree instead of splicing children upward
        recursive: bool,
    },
}

impl Action {
    /// Kind of this action
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Add { .. } => ActionKind::Add,
            Action::Move { .. } => ActionKind::Move,
            Action::Remove { .. } => ActionKind::Remove,
        }
    }

    /// The node this action targets
    pub fn node(&self) -> &NodeId {
        match self {
            Action::Add { node, .. } | Action::Move { node, .. } | Action::Remove { node, .. } => {
                node
            }
        }
    }

    /// Apply this action to a forest through the matching forest operation
    pub fn apply(&self, forest: &mut Forest) -> forestrecorder_core::Result<()> {
        match self {
            Action::Add {
                node,
                parent,
                children,
            } => forest.add(node.clone(), parent.clone(), children),
            Action::Move {
                node,
                parent,
                children,
            } => forest.move_node(node, parent.clone(), children),
            Action::Remove { node, recursive } => forest.remove(node, *recursive).map(|_| ()),
        }
    }

    fn push_fields(&self, line: &mut String) {
        match self {
            Action::Add {
                parent, children, ..
            }
            | Action::Move {
                parent, children, ..
            } => {
                line.push(FIELD_SEPARATOR);
                line.push_str(parent.as_field());
                for child in children {
                    line.push(FIELD_SEPARATOR);
                    line.push_str(child.as_str());
                }
            }
            Action::Remove { recursive, .. } => {
                if *recursive {
                    line.push(FIELD_SEPARATOR);
                    line.push_str(RECURSIVE_FLAG);
                }
            }
        }
    }
}

/// One line of the action log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    /// Seconds since the unix epoch when the action was recorded
    pub timestamp: i64,
    /// Timezone name the action was recorded in
    pub timezone: String,
    /// The mutation itself
    pub action: Action,
}

impl ActionRecord {
    /// Create a new record
    pub fn new(timestamp: i64, timezone: impl Into<String>, action: Action) -> Self {
        ActionRecord {
            timestamp,
            timezone: timezone.into(),
            action,
        }
    }

    /// Timestamp as a UTC datetime, if it is within chrono's range
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.timestamp, 0)
    }

    /// Encode as a single line, without the trailing newline
    pub fn encode(&self) -> String {
        let mut line = String::new();
        line.push_str(&self.timestamp.to_string());
        line.push(FIELD_SEPARATOR);
        line.push_str(&self.timezone);
        line.push(FIELD_SEPARATOR);
        line.push_str(self.action.kind().keyword());
        line.push(FIELD_SEPARATOR);
        line.push_str(self.action.node().as_str());
        self.action.push_fields(&mut line);
        line
    }

    /// Decode a single line (a trailing `\n` or `\r\n` is tolerated)
    pub fn decode(line: &str) -> Result<Self, RecordError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < HEADER_FIELDS {
            return Err(RecordError::TooFewFields {
                count: fields.len(),
            });
        }

        let timestamp = fields[0]
            .parse::<i64>()
            .map_err(|_| RecordError::InvalidTimestamp(fields[0].to_string()))?;
        let timezone = fields[1].to_string();
        let kind = ActionKind::from_keyword(fields[2])
            .ok_or_else(|| RecordError::UnknownAction(fields[2].to_string()))?;
        let node = parse_id(fields[3])?;
        let args = &fields[HEADER_FIELDS..];

        let action = match kind {
            ActionKind::Add | ActionKind::Move => {
                let Some((parent, children)) = args.split_first() else {
                    return Err(RecordError::Arity {
                        action: kind,
                        count: args.len(),
                    });
                };
                let parent = Parent::parse(parent).map_err(|source| RecordError::InvalidNodeId {
                    field: parent.to_string(),
                    source,
                })?;
                let children = children
                    .iter()
                    .map(|child| parse_id(child))
                    .collect::<Result<Vec<_>, _>>()?;
                if kind == ActionKind::Add {
                    Action::Add {
                        node,
                        parent,
                        children,
                    }
                } else {
                    Action::Move {
                        node,
                        parent,
                        children,
                    }
                }
            }
            ActionKind::Remove => match args {
                [] => Action::Remove {
                    node,
                    recursive: false,
                },
                [flag] => Action::Remove {
                    node,
                    recursive: !flag.is_empty(),
                },
                _ => {
                    return Err(RecordError::Arity {
                        action: kind,
                        count: args.len(),
                    })
                }
            },
        };

        Ok(ActionRecord {
            timestamp,
            timezone,
            action,
        })
    }
}

fn parse_id(field: &str) -> Result<NodeId, RecordError> {
    NodeId::new(field).map_err(|source| RecordError::InvalidNodeId {
        field: field.to_string(),
        source,
    })
}

/// Record decoding errors
///
/// Every variant means the log line is not a valid action; replay treats all
/// of them as corruption.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Fewer than the four mandatory fields
    #[error("expected at least 4 fields, found {count}")]
    TooFewFields {
        /// Number of fields found
        count: usize,
    },

    /// Timestamp field is not an integer
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// Action keyword not recognized
    #[error("unknown action: {0:?}")]
    UnknownAction(String),

    /// Wrong number of trailing arguments for the action kind
    #[error("wrong number of arguments for {action}: {count}")]
    Arity {
        /// Action kind being decoded
        action: ActionKind,
        /// Number of trailing arguments found
        count: usize,
    },

    /// A node, parent or child field is not a valid id
    #[error("invalid node id {field:?}: {source}")]
    InvalidNodeId {
        /// Raw field
        field: String,
        /// Validation failure
        source: NodeIdError,
    },
}
