//! Result → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): `OK`, an indented tree for `dump`, one line per
//!   record for `history`
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use std::path::Path;

use chrono::SecondsFormat;
use forestrecorder_core::{Parent, Subtree};
use forestrecorder_durability::{Action, ActionRecord};
use serde_json::{json, Value};

use crate::parse::CliError;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Format an error.
pub fn format_error(err: &CliError, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!({
            "error": err.to_string(),
            "code": err.code(),
        })),
        OutputMode::Human => format!("(error) {}: {}", err.code(), err),
    }
}

/// Format the record written by a successful mutation.
pub fn format_recorded(record: &ActionRecord, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&record_json(record)),
        OutputMode::Human => "OK".to_string(),
    }
}

/// Format the full history.
pub fn format_history(records: &[ActionRecord], mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&Value::Array(records.iter().map(record_json).collect())),
        OutputMode::Human => {
            if records.is_empty() {
                return "(empty log)".to_string();
            }
            records
                .iter()
                .enumerate()
                .map(|(i, r)| format!("{}) {}", i + 1, history_line(r)))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// Format an exported forest.
pub fn format_dump(forest: &Subtree, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(forest)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputMode::Human => {
            if forest.is_empty() {
                return "(empty forest)".to_string();
            }
            let mut lines = Vec::new();
            push_tree(forest, 0, &mut lines);
            lines.join("\n")
        }
    }
}

/// Format the path of a written config file.
pub fn format_configured(path: &Path, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!({ "config": path.display().to_string() })),
        OutputMode::Human => format!("OK wrote {}", path.display()),
    }
}

/// Format the version.
pub fn format_version(version: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!({ "version": version })),
        OutputMode::Human => format!("forestrecorder {}", version),
    }
}

fn push_tree(tree: &Subtree, depth: usize, lines: &mut Vec<String>) {
    for (id, children) in tree {
        lines.push(format!("{}{}", "  ".repeat(depth), id));
        push_tree(children, depth + 1, lines);
    }
}

fn recorded_time(record: &ActionRecord) -> String {
    record
        .recorded_at()
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| record.timestamp.to_string())
}

fn history_line(record: &ActionRecord) -> String {
    let mut line = format!(
        "{} {} {} {}",
        recorded_time(record),
        record.timezone,
        record.action.kind(),
        record.action.node()
    );
    match &record.action {
        Action::Add {
            parent, children, ..
        }
        | Action::Move {
            parent, children, ..
        } => {
            line.push_str(&format!(" under {}", parent));
            if !children.is_empty() {
                let names: Vec<&str> = children.iter().map(|c| c.as_str()).collect();
                line.push_str(&format!(" adopting {}", names.join(", ")));
            }
        }
        Action::Remove { recursive, .. } => {
            if *recursive {
                line.push_str(" (recursive)");
            }
        }
    }
    line
}

fn record_json(record: &ActionRecord) -> Value {
    let mut obj = json!({
        "timestamp": record.timestamp,
        "time": recorded_time(record),
        "timezone": record.timezone,
        "action": record.action.kind().keyword(),
        "node": record.action.node().as_str(),
    });
    match &record.action {
        Action::Add {
            parent, children, ..
        }
        | Action::Move {
            parent, children, ..
        } => {
            obj["parent"] = match parent {
                Parent::Root => Value::Null,
                Parent::Node(p) => Value::from(p.as_str()),
            };
            obj["children"] = children.iter().map(|c| Value::from(c.as_str())).collect();
        }
        Action::Remove { recursive, .. } => {
            obj["recursive"] = Value::Bool(*recursive);
        }
    }
    obj
}
