//! Bounded retry for transient database lock contention
//!
//! Only failures whose message signals `database is locked` are retried.
//! Any other failure is returned unchanged on the spot. When the attempt
//! budget runs out the last lock failure is turned into a `DB_LOCKED`
//! storage error.

use crate::error::app_error::{ATTEMPTS_KEY, OPERATION_KEY};
use crate::error::{classifier, AppError, ErrorContext, Failure, RawFailure};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Delay schedule between attempts
#[derive(Debug, Clone, PartialEq)]
pub enum BackoffStrategy {
    /// Same delay before every retry
    Fixed,
    /// `delay * multiplier^(attempt - 1)`, capped at `max`
    Exponential { multiplier: f64, max: Duration },
}

impl BackoffStrategy {
    /// Delay to wait after the failed `attempt` (1-based)
    pub fn delay(&self, base: Duration, attempt: u32) -> Duration {
        match self {
            BackoffStrategy::Fixed => base,
            BackoffStrategy::Exponential { multiplier, max } => {
                let factor = multiplier.powf(attempt.saturating_sub(1) as f64);
                // Overflow and non-finite factors saturate at the cap
                Duration::try_from_secs_f64(base.as_secs_f64() * factor)
                    .map_or(*max, |delay| delay.min(*max))
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        BackoffStrategy::Fixed
    }
}

/// Configuration for lock recovery
#[derive(Debug, Clone, PartialEq)]
pub struct LockRetryConfig {
    /// Maximum number of invocations, including the first one
    pub max_attempts: u32,
    /// Base delay between attempts
    pub delay: Duration,
    pub backoff: BackoffStrategy,
    /// Recorded in the exhaustion error's context when set
    pub operation_name: Option<String>,
}

impl Default for LockRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
            backoff: BackoffStrategy::Fixed,
            operation_name: None,
        }
    }
}

impl LockRetryConfig {
    /// Fixed-delay config
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            ..Default::default()
        }
    }

    /// Exponential backoff doubling from `delay`, capped at 5s
    pub fn exponential(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff: BackoffStrategy::Exponential {
                multiplier: 2.0,
                max: Duration::from_secs(5),
            },
            operation_name: None,
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }
}

/// Runs operations under a [`LockRetryConfig`]
#[derive(Debug, Clone, Default)]
pub struct LockRecovery {
    config: LockRetryConfig,
}

impl LockRecovery {
    pub fn new(config: LockRetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LockRetryConfig {
        &self.config
    }

    /// Invoke `operation` until it succeeds, fails with a non-lock
    /// failure, or the attempt budget is spent
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, Failure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Failure>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let operation_name = self.config.operation_name.as_deref().unwrap_or("operation");
        let mut attempt = 1;

        loop {
            let failure = match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("{} succeeded after {} attempts", operation_name, attempt);
                    }
                    return Ok(value);
                }
                Err(err) => err.into(),
            };

            if !classifier::is_lock_contention(failure.message()) {
                return Err(failure);
            }

            if attempt >= max_attempts {
                warn!(
                    "Database lock persisted for {} after {} attempts",
                    operation_name, max_attempts
                );
                return Err(Failure::App(self.exhausted(&failure, max_attempts)));
            }

            let delay = self.config.backoff.delay(self.config.delay, attempt);
            warn!(
                "Database lock detected for {}, retrying in {:?} ({}/{})",
                operation_name, delay, attempt, max_attempts
            );
            sleep(delay).await;
            attempt += 1;
        }
    }

    fn exhausted(&self, last: &Failure, attempts: u32) -> AppError {
        let mut context = ErrorContext::new().with(ATTEMPTS_KEY, attempts);
        if let Some(name) = &self.config.operation_name {
            context.insert(OPERATION_KEY, name.as_str());
        }
        AppError::storage(
            format!("Database operation failed after {} attempts", attempts),
            &RawFailure::new(last.message()),
            context,
        )
    }
}

/// Retry `operation` on lock contention with the default budget (3 attempts, 100ms)
pub async fn recover_from_database_lock<T, E, F, Fut>(operation: F) -> Result<T, Failure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Failure>,
{
    LockRecovery::default().run(operation).await
}

/// Retry `operation` on lock contention with an explicit budget and fixed delay
pub async fn recover_from_database_lock_with<T, E, F, Fut>(
    operation: F,
    max_attempts: u32,
    delay: Duration,
) -> Result<T, Failure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Failure>,
{
    LockRecovery::new(LockRetryConfig::fixed(max_attempts, delay))
        .run(operation)
        .await
}
