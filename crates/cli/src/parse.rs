//! ArgMatches → CliAction conversion.
//!
//! Node ids are validated here, so a bad id is reported before any config is
//! loaded or the log is read.

use std::path::PathBuf;

use clap::ArgMatches;
use forestrecorder_core::{NodeId, Parent};
use forestrecorder_durability::{Action, DurabilityMode};
use forestrecorder_engine::{ConfigError, RecorderError};

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    /// Write the config file.
    Configure(ConfigureOptions),
    /// Record one mutation.
    Mutate(Action),
    /// List the log's records.
    History,
    /// Print the current forest.
    Dump,
    /// Print the version.
    Version,
}

/// Options for `configure`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureOptions {
    pub log: Option<PathBuf>,
    pub timezone: Option<String>,
    pub durability: Option<DurabilityMode>,
    pub force: bool,
}

impl ConfigureOptions {
    /// Whether any setting was given explicitly.
    pub fn has_overrides(&self) -> bool {
        self.log.is_some() || self.timezone.is_some() || self.durability.is_some()
    }
}

/// Errors turning matches into an action.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Recorder(#[from] RecorderError),

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl CliError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Recorder(e) => e.code(),
            CliError::UnknownCommand(_) => "usage",
        }
    }
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, CliError> {
    let Some((sub_name, sub_matches)) = matches.subcommand() else {
        return Err(CliError::UnknownCommand(String::new()));
    };

    match sub_name {
        "configure" => parse_configure(sub_matches),
        "add" => {
            let (node, parent, children) = parse_placement(sub_matches)?;
            Ok(CliAction::Mutate(Action::Add {
                node,
                parent,
                children,
            }))
        }
        "move" => {
            let (node, parent, children) = parse_placement(sub_matches)?;
            Ok(CliAction::Mutate(Action::Move {
                node,
                parent,
                children,
            }))
        }
        "remove" => Ok(CliAction::Mutate(Action::Remove {
            node: node_id(required(sub_matches, "node"))?,
            recursive: sub_matches.get_flag("recursive"),
        })),
        "history" => Ok(CliAction::History),
        "dump" => Ok(CliAction::Dump),
        "version" => Ok(CliAction::Version),
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

fn parse_configure(m: &ArgMatches) -> Result<CliAction, CliError> {
    let durability = m
        .get_one::<String>("durability")
        .map(|s| s.parse::<DurabilityMode>().map_err(ConfigError::from))
        .transpose()
        .map_err(RecorderError::from)?;

    Ok(CliAction::Configure(ConfigureOptions {
        log: m.get_one::<String>("log").map(PathBuf::from),
        timezone: m.get_one::<String>("timezone").cloned(),
        durability,
        force: m.get_flag("force"),
    }))
}

fn parse_placement(m: &ArgMatches) -> Result<(NodeId, Parent, Vec<NodeId>), CliError> {
    let node = node_id(required(m, "node"))?;
    let parent = match m.get_one::<String>("parent") {
        Some(p) => Parent::Node(node_id(p)?),
        None => Parent::Root,
    };
    let children = m
        .get_many::<String>("children")
        .map(|vals| vals.map(|v| node_id(v)).collect::<Result<Vec<_>, _>>())
        .transpose()?
        .unwrap_or_default();
    Ok((node, parent, children))
}

fn required<'a>(m: &'a ArgMatches, id: &str) -> &'a str {
    m.get_one::<String>(id).map(String::as_str).unwrap_or_default()
}

fn node_id(raw: &str) -> Result<NodeId, CliError> {
    NodeId::new(raw).map_err(|e| CliError::Recorder(e.into()))
}
