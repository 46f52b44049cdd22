//! Aggregated validation results
//!
//! Form validators collect every failed rule into a [`ValidationReport`];
//! the first issue becomes the [`AppError`] surfaced to the caller while
//! the full list travels in its context under `allErrors`.

use super::app_error::{AppError, OPERATION_KEY};
use super::context::ErrorContext;
use super::types::{BokiError, BokiResult};
use serde::{Deserialize, Serialize};

pub const ALL_ERRORS_KEY: &str = "allErrors";

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Outcome of validating one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Concatenate several reports into one
    pub fn combine(reports: impl IntoIterator<Item = ValidationReport>) -> Self {
        Self {
            issues: reports.into_iter().flat_map(|r| r.issues).collect(),
        }
    }
}

impl AppError {
    /// Validation error for the first issue of a failing report
    ///
    /// # Errors
    /// Returns [`BokiError::InvalidOperation`] when the report has no issues.
    pub fn from_validation_report(
        report: &ValidationReport,
        operation: &str,
    ) -> BokiResult<AppError> {
        let first = report.issues.first().ok_or_else(|| {
            BokiError::invalid_operation(
                "from_validation_report",
                "a valid report cannot be converted into a validation error",
            )
        })?;

        let context = ErrorContext::new()
            .with(OPERATION_KEY, operation)
            .with(ALL_ERRORS_KEY, serde_json::to_value(&report.issues)?);

        Ok(AppError::validation(
            first.message.clone(),
            first.field.clone(),
            first.rule.clone(),
            context,
        ))
    }
}
