use crate::logger::{Logger, OutputSink};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Logger settings read from a JSON file such as `{"level": "debug"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
        }
    }
}

impl LoggerConfig {
    /// Set `logger`'s threshold from the configured level.
    pub fn apply<S: OutputSink>(&self, logger: &Logger<S>) {
        logger.set_threshold(&self.level);
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid logger config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_config(content: &str) -> Result<LoggerConfig, ConfigError> {
    serde_json::from_str(content).map_err(Into::into)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<LoggerConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}
