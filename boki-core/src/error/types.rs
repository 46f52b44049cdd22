//! Infrastructure error type for boki-core
//!
//! [`BokiError`] covers failures of the subsystem's own plumbing, such as
//! loading configuration or misusing an API. Domain failures raised by the
//! application are [`AppError`](super::AppError) values instead.

use thiserror::Error;

/// Error type for boki-core infrastructure operations
#[derive(Error, Debug)]
pub enum BokiError {
    #[error("Configuration error in {component}: {message}")]
    ConfigurationError { component: String, message: String },

    #[error("TOML error: {0}")]
    TomlError(#[source] Box<toml::de::Error>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid operation '{operation}': {reason}")]
    InvalidOperation { operation: String, reason: String },

    #[error("Multiple errors in {context}: {}", format_errors(.errors))]
    Multiple {
        context: String,
        errors: Vec<BokiError>,
    },
}

// Helper function to format multiple errors
pub fn format_errors(errors: &[BokiError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {}", i + 1, e))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type BokiResult<T> = std::result::Result<T, BokiError>;
