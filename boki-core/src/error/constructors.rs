//! Constructor methods for BokiError

use super::types::BokiError;

impl BokiError {
    /// Create a configuration error with component and message
    ///
    /// # Examples
    /// ```rust
    /// use boki_core::error::BokiError;
    ///
    /// let err = BokiError::configuration("recovery.max_attempts", "must be at least 1");
    /// assert!(err.to_string().contains("recovery.max_attempts"));
    /// ```
    pub fn configuration(component: impl Into<String>, message: impl Into<String>) -> Self {
        BokiError::ConfigurationError {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error with the rejected value
    pub fn invalid_config<T: std::fmt::Display>(field: &str, value: T, reason: &str) -> Self {
        BokiError::ConfigurationError {
            component: field.to_string(),
            message: format!("Invalid value '{}': {}", value, reason),
        }
    }

    pub fn invalid_operation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        BokiError::InvalidOperation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Collapse a list of errors, returning `Ok` when it is empty
    pub fn from_many(context: impl Into<String>, mut errors: Vec<BokiError>) -> Result<(), Self> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(BokiError::Multiple {
                context: context.into(),
                errors,
            }),
        }
    }
}
