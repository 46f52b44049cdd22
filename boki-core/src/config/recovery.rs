//! Lock recovery configuration

use crate::error::{BokiError, BokiResult};
use crate::patterns::{BackoffStrategy, LockRetryConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const BACKOFF_FIXED: &str = "fixed";
pub const BACKOFF_EXPONENTIAL: &str = "exponential";

/// Retry budget for database lock contention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Total invocations, including the first one
    pub max_attempts: u32,

    /// Base delay between attempts
    #[serde(with = "humantime_serde")]
    pub delay: Duration,

    /// Backoff strategy (fixed, exponential)
    pub backoff: String,

    /// Growth factor for exponential backoff
    pub multiplier: f64,

    /// Cap on the exponential delay
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(100),
            backoff: BACKOFF_FIXED.to_string(),
            multiplier: 2.0,
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RecoveryConfig {
    pub fn validate(&self) -> BokiResult<()> {
        if self.max_attempts == 0 {
            return Err(BokiError::invalid_config(
                "recovery.max_attempts",
                self.max_attempts,
                "must be at least 1",
            ));
        }

        match self.backoff.as_str() {
            BACKOFF_FIXED | BACKOFF_EXPONENTIAL => {}
            other => {
                return Err(BokiError::invalid_config(
                    "recovery.backoff",
                    other,
                    "expected 'fixed' or 'exponential'",
                ))
            }
        }

        if self.multiplier.is_nan() || self.multiplier < 1.0 {
            return Err(BokiError::invalid_config(
                "recovery.multiplier",
                self.multiplier,
                "must be >= 1.0",
            ));
        }

        Ok(())
    }

    pub fn backoff_strategy(&self) -> BackoffStrategy {
        if self.backoff == BACKOFF_EXPONENTIAL {
            BackoffStrategy::Exponential {
                multiplier: self.multiplier,
                max: self.max_delay,
            }
        } else {
            BackoffStrategy::Fixed
        }
    }
}

impl From<&RecoveryConfig> for LockRetryConfig {
    fn from(config: &RecoveryConfig) -> Self {
        LockRetryConfig::fixed(config.max_attempts, config.delay)
            .with_backoff(config.backoff_strategy())
    }
}
