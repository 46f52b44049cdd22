//! Configuration for the error handling subsystem
//!
//! Settings are loaded from TOML, then environment overrides are applied,
//! then the result is validated.
//!
//! # Example Configuration
//!
//! ```toml
//! [recovery]
//! max_attempts = 3
//! delay = "100ms"
//! backoff = "fixed"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variables
//!
//! - `BOKI_LOCK_RETRY_MAX_ATTEMPTS`
//! - `BOKI_LOCK_RETRY_DELAY_MS`
//! - `BOKI_LOCK_RETRY_BACKOFF`
//! - `BOKI_LOG_LEVEL`
//! - `BOKI_LOG_FORMAT`

mod logging;
mod recovery;

pub use logging::{LoggingConfig, LOG_FORMATS, LOG_LEVELS};
pub use recovery::{RecoveryConfig, BACKOFF_EXPONENTIAL, BACKOFF_FIXED};

use crate::error::{BokiError, BokiResult};
use crate::patterns::LockRetryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_MAX_ATTEMPTS: &str = "BOKI_LOCK_RETRY_MAX_ATTEMPTS";
pub const ENV_DELAY_MS: &str = "BOKI_LOCK_RETRY_DELAY_MS";
pub const ENV_BACKOFF: &str = "BOKI_LOCK_RETRY_BACKOFF";
pub const ENV_LOG_LEVEL: &str = "BOKI_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "BOKI_LOG_FORMAT";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recovery: RecoveryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse and validate TOML without consulting the environment
    pub fn from_toml_str(content: &str) -> BokiResult<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> BokiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BokiError::configuration(
                "config_file",
                format!("Failed to read {}: {}", path.display(), e),
            )
        })?;
        Self::finish(toml::from_str(&content)?)
    }

    /// Load configuration from a TOML file (async version)
    pub async fn from_file_async<P: AsRef<Path>>(path: P) -> BokiResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            BokiError::configuration(
                "config_file",
                format!("Failed to read {}: {}", path.display(), e),
            )
        })?;
        Self::finish(toml::from_str(&content)?)
    }

    fn finish(mut config: Config) -> BokiResult<Self> {
        config.apply_env_overrides()?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> BokiResult<()> {
        if let Ok(value) = std::env::var(ENV_MAX_ATTEMPTS) {
            self.recovery.max_attempts = value.trim().parse().map_err(|_| {
                BokiError::invalid_config(ENV_MAX_ATTEMPTS, &value, "expected a positive integer")
            })?;
        }
        if let Ok(value) = std::env::var(ENV_DELAY_MS) {
            let millis: u64 = value.trim().parse().map_err(|_| {
                BokiError::invalid_config(ENV_DELAY_MS, &value, "expected milliseconds")
            })?;
            self.recovery.delay = Duration::from_millis(millis);
        }
        if let Ok(value) = std::env::var(ENV_BACKOFF) {
            self.recovery.backoff = value;
        }
        if let Ok(value) = std::env::var(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }
        if let Ok(value) = std::env::var(ENV_LOG_FORMAT) {
            self.logging.format = value;
        }
        Ok(())
    }

    /// Trim and lowercase the string-valued settings, whatever their source
    pub fn normalize(&mut self) {
        for value in [
            &mut self.recovery.backoff,
            &mut self.logging.level,
            &mut self.logging.format,
        ] {
            *value = value.trim().to_lowercase();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> BokiResult<()> {
        let errors = [self.recovery.validate(), self.logging.validate()]
            .into_iter()
            .filter_map(Result::err)
            .collect();
        BokiError::from_many("configuration", errors)
    }

    pub fn lock_retry(&self) -> LockRetryConfig {
        LockRetryConfig::from(&self.recovery)
    }
}

/// Programmatic construction of a [`Config`]
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.recovery.max_attempts = attempts;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.recovery.delay = delay;
        self
    }

    pub fn exponential_backoff(mut self, multiplier: f64, max_delay: Duration) -> Self {
        self.config.recovery.backoff = BACKOFF_EXPONENTIAL.to_string();
        self.config.recovery.multiplier = multiplier;
        self.config.recovery.max_delay = max_delay;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn log_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    pub fn build(mut self) -> BokiResult<Config> {
        self.config.normalize();
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
