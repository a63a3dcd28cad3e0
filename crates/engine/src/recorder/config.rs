//! Recorder configuration via `forestrecorder.toml`
//!
//! The config file names the action log and the timezone recorded with each
//! action. `forestrecorder configure` writes a commented default; to change
//! settings, edit the file.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

use forestrecorder_durability::{DurabilityMode, ParseDurabilityError};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "forestrecorder.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "FORESTRECORDER_CONFIG";

/// Log file name used when the config does not name one
pub const DEFAULT_LOG_FILE_NAME: &str = "forest.log";

/// Recorder configuration loaded from `forestrecorder.toml`.
///
/// # Example
///
/// ```toml
/// log = "/home/me/forest.log"
/// timezone = "Europe/Paris"
/// durability = "always"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Path of the action log. Relative paths resolve against the directory
    /// holding the config file.
    #[serde(default = "default_log")]
    pub log: PathBuf,
    /// Timezone name written into every record.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Durability mode: `"always"` or `"standard"`.
    #[serde(default = "default_durability_str")]
    pub durability: String,
}

fn default_log() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE_NAME)
}

fn default_timezone() -> String {
    std::env::var("TZ")
        .ok()
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| "UTC".to_string())
}

fn default_durability_str() -> String {
    DurabilityMode::Always.as_str().to_string()
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            log: default_log(),
            timezone: default_timezone(),
            durability: default_durability_str(),
        }
    }
}

impl RecorderConfig {
    /// Config recording into the given log with default settings
    pub fn for_log(log: impl Into<PathBuf>) -> Self {
        Self {
            log: log.into(),
            ..Self::default()
        }
    }

    /// Set the timezone name
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Set the durability mode
    pub fn with_durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = mode.as_str().to_string();
        self
    }

    /// Parse the durability string into a `DurabilityMode`.
    pub fn durability_mode(&self) -> Result<DurabilityMode, ConfigError> {
        Ok(self.durability.parse()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.durability_mode()?;
        if self.timezone.is_empty() || self.timezone.contains(&['\t', '\r', '\n'][..]) {
            return Err(ConfigError::InvalidTimezone(self.timezone.clone()));
        }
        Ok(())
    }

    /// Config file location: `$FORESTRECORDER_CONFIG`, else
    /// `$HOME/.config/forestrecorder/forestrecorder.toml`
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        std::env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(|home| {
                PathBuf::from(home)
                    .join(".config")
                    .join("forestrecorder")
                    .join(CONFIG_FILE_NAME)
            })
    }

    /// Load from an explicit path, or from [`default_path`](Self::default_path)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().ok_or(ConfigError::NoConfigPath)?,
        };
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }
        Self::from_file(&path)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# forestrecorder configuration
#
# Action log file. Relative paths resolve against this file's directory.
log = "forest.log"

# Timezone name stored with every recorded action (defaults to $TZ or UTC).
# timezone = "UTC"

# Durability mode: "always" (default) or "standard"
#   "always"   = fsync every append, a reported success is on disk
#   "standard" = flush to the OS only, may lose the last appends on power loss
durability = "always"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// A relative `log` path is resolved against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: RecorderConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if config.log.is_relative() {
            if let Some(dir) = path.parent() {
                config.log = dir.join(&config.log);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `true` if the file was created.
    pub fn write_default_if_missing(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }
        Self::write_default(path)?;
        Ok(true)
    }

    /// Write the commented default config file, replacing any existing one.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        write_file(path, Self::default_toml())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        write_file(path, &content)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ConfigError> {
    let write = || -> io::Result<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, content)
    };
    write().map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No config path given and none could be derived from the environment
    #[error("no config path: set FORESTRECORDER_CONFIG or HOME, or pass --config")]
    NoConfigPath,

    /// Config file does not exist
    #[error("config file {} not found (run `forestrecorder configure`)", .path.display())]
    NotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// Config file exists and overwriting was not requested
    #[error("config file {} already exists (use --force to overwrite)", .path.display())]
    AlreadyExists {
        /// Existing config file
        path: PathBuf,
    },

    /// Config file could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// Config file could not be written
    #[error("failed to write config file {}: {source}", .path.display())]
    Write {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid durability string
    #[error(transparent)]
    InvalidDurability(#[from] ParseDurabilityError),

    /// Timezone name is empty or contains a log delimiter
    #[error("invalid timezone name {0:?}")]
    InvalidTimezone(String),
}
