//! Durability mode configuration
//!
//! Controls whether an append waits for the data to reach stable storage.

use std::fmt;
use std::str::FromStr;

/// Durability mode for action log appends
///
/// | Mode | flush | fsync | Data Loss Window |
/// |------|-------|-------|------------------|
/// | Always | Every append | Every append | Zero |
/// | Standard | Every append | Left to the OS | Until the OS writes back |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// fsync after every append (the default)
    ///
    /// A mutation is only reported as successful once its record is on
    /// stable storage.
    #[default]
    Always,

    /// Flush to the OS after every append, without fsync
    ///
    /// Survives a process crash but not necessarily a power loss.
    Standard,
}

impl DurabilityMode {
    /// Check if this mode requires an fsync on every append
    pub fn requires_immediate_fsync(&self) -> bool {
        matches!(self, DurabilityMode::Always)
    }

    /// Name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            DurabilityMode::Always => "always",
            DurabilityMode::Standard => "standard",
        }
    }
}

impl fmt::Display for DurabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized durability mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid durability mode {0:?}, expected \"always\" or \"standard\"")]
pub struct ParseDurabilityError(pub String);

impl FromStr for DurabilityMode {
    type Err = ParseDurabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(DurabilityMode::Always),
            "standard" => Ok(DurabilityMode::Standard),
            other => Err(ParseDurabilityError(other.to_string())),
        }
    }
}
