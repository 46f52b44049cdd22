//! Raw failures and the dispatcher's input type
//!
//! The data-access layer hands failures over as opaque text, optionally with
//! a driver error code. [`Failure`] tags whether a failure has already been
//! classified, replacing any runtime type inspection at the dispatch site.

use super::app_error::AppError;
use thiserror::Error;

/// An unclassified failure raised below the error subsystem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RawFailure {
    message: String,
    code: Option<String>,
}

impl RawFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Attach a driver error code such as `SQLITE_BUSY`
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Capture the display text of any error
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::new(err.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl From<&str> for RawFailure {
    fn from(message: &str) -> Self {
        RawFailure::new(message)
    }
}

impl From<String> for RawFailure {
    fn from(message: String) -> Self {
        RawFailure::new(message)
    }
}

/// Anything the dispatcher accepts: a classified error or a raw failure
#[derive(Error, Debug, Clone)]
pub enum Failure {
    #[error(transparent)]
    App(AppError),

    #[error(transparent)]
    Raw(RawFailure),
}

impl Failure {
    /// Diagnostic text used for classification
    pub fn message(&self) -> &str {
        match self {
            Failure::App(err) => err.message(),
            Failure::Raw(raw) => raw.message(),
        }
    }

    /// The classified error, if this failure carries one
    pub fn as_app_error(&self) -> Option<&AppError> {
        match self {
            Failure::App(err) => Some(err),
            Failure::Raw(_) => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Failure::App(_))
    }

    /// Reduce to a raw failure, dropping any classification
    pub fn into_raw(self) -> RawFailure {
        match self {
            Failure::App(err) => RawFailure::new(err.message()),
            Failure::Raw(raw) => raw,
        }
    }
}

impl From<AppError> for Failure {
    fn from(err: AppError) -> Self {
        Failure::App(err)
    }
}

impl From<RawFailure> for Failure {
    fn from(raw: RawFailure) -> Self {
        Failure::Raw(raw)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Failure::Raw(RawFailure::new(message))
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Failure::Raw(RawFailure::new(message))
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Failure::Raw(RawFailure::from_error(&err))
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app) => Failure::App(app),
            Err(err) => match err.downcast::<RawFailure>() {
                Ok(raw) => Failure::Raw(raw),
                Err(err) => Failure::Raw(RawFailure::new(format!("{:#}", err))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_failure_code() {
        let raw = RawFailure::new("database is locked").with_code("SQLITE_BUSY");
        assert_eq!(raw.message(), "database is locked");
        assert_eq!(raw.code(), Some("SQLITE_BUSY"));
        assert_eq!(raw.to_string(), "database is locked");
    }

    #[test]
    fn test_anyhow_conversion_keeps_classification() {
        let app = AppError::new("boom");
        let failure: Failure = anyhow::Error::new(app).into();
        assert!(failure.is_classified());

        let failure: Failure = anyhow::anyhow!("plain failure").into();
        assert!(!failure.is_classified());
        assert_eq!(failure.message(), "plain failure");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk I/O error");
        let failure: Failure = io.into();
        assert_eq!(failure.message(), "disk I/O error");
    }
}
