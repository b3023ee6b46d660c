use crate::{DEFAULT_LOG_COLORED, DEFAULT_LOG_LEVEL_STRING, LogLevel};

use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub colored: bool,
    /// Optional log file path. None = stdout.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            // FromStr never fails (defaults to Info)
            level: LogLevel::from_str(DEFAULT_LOG_LEVEL_STRING).unwrap(),
            colored: DEFAULT_LOG_COLORED,
            file: None,
        }
    }
}
