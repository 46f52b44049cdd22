//! Logging configuration

use crate::error::{BokiError, BokiResult};
use serde::{Deserialize, Serialize};

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
pub const LOG_FORMATS: &[&str] = &["pretty", "json"];

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json)
    pub format: String,

    /// Include the event target in output
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            with_target: true,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> BokiResult<()> {
        if !LOG_LEVELS.contains(&self.level.as_str()) {
            return Err(BokiError::invalid_config(
                "logging.level",
                &self.level,
                "expected one of trace, debug, info, warn, error",
            ));
        }
        if !LOG_FORMATS.contains(&self.format.as_str()) {
            return Err(BokiError::invalid_config(
                "logging.format",
                &self.format,
                "expected 'pretty' or 'json'",
            ));
        }
        Ok(())
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}
