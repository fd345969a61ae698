use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

use klondike_core::hint::{DEFAULT_MAX_DEPTH, HintConfig};

const MAX_HINT_DEPTH: usize = 32;
const DEFAULT_LOG_PATH: &str = "klondike.log.jsonl";

/// Root play configuration loaded from YAML. Every block is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PlayConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub hint: HintSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PlayConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: PlayConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.hint.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }
}

/// Hint search block.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HintSettings {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for HintSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl HintSettings {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_HINT_DEPTH).contains(&self.max_depth) {
            return Err(ValidationError::InvalidField {
                field: "hint.max_depth".to_string(),
                message: format!("depth must be between 1 and {MAX_HINT_DEPTH}"),
            });
        }
        Ok(())
    }

    pub fn to_hint_config(&self) -> HintConfig {
        HintConfig {
            max_depth: self.max_depth,
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_path: default_log_path(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "logging.log_path".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
