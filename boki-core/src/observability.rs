//! Tracing subscriber setup
//!
//! Dispatcher log records carry structured fields (`tag`, `log_level`,
//! `severity`, `code`, `recoverable`, `payload`) that the JSON layer emits
//! verbatim.

use crate::config::LoggingConfig;
use crate::error::BokiResult;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global subscriber described by `config`
///
/// `RUST_LOG` takes precedence over the configured level. Returns
/// `Ok(false)` when a subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> BokiResult<bool> {
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("boki_core={}", config.level)));

    let installed = if config.is_json() {
        Registry::default()
            .with(env_filter)
            .with(fmt::layer().json().with_target(config.with_target))
            .try_init()
    } else {
        Registry::default()
            .with(env_filter)
            .with(fmt::layer().with_target(config.with_target))
            .try_init()
    };

    Ok(installed.is_ok())
}
