//! The structured application error and its taxonomy variants
//!
//! Every failure that reaches presentation code is an [`AppError`]. The
//! variant is carried in [`AppErrorKind`]; for storage and validation errors
//! the code and severity are derived from the kind and cannot be overridden.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Application Error Taxonomy                │
//! ├───────────────┬──────────────────────┬───────────────────────┤
//! │ General       │ caller-chosen code    │ default MEDIUM        │
//! │ Storage       │ DB_* (classified)     │ derived from message  │
//! │ Validation    │ VALIDATION_ERROR      │ always MEDIUM         │
//! │ BusinessRule  │ caller-chosen code    │ always HIGH           │
//! └───────────────┴──────────────────────┴───────────────────────┘
//! ```

use super::classifier;
use super::codes::{self, StorageCode};
use super::context::ErrorContext;
use super::failure::RawFailure;
use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Context key holding the raw diagnostic text of a storage failure
pub const ORIGINAL_ERROR_KEY: &str = "originalError";
/// Context key holding a driver error code, when the raw failure had one
pub const SQL_CODE_KEY: &str = "sqlCode";
pub const OPERATION_KEY: &str = "operation";
pub const ATTEMPTS_KEY: &str = "attempts";
pub const FIELD_KEY: &str = "field";
pub const VALIDATION_RULE_KEY: &str = "validationRule";

/// Taxonomy variant of an [`AppError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppErrorKind {
    General,
    Storage {
        code: StorageCode,
    },
    Validation {
        field: String,
        validation_rule: String,
    },
    BusinessRule,
}

/// Structured application error
///
/// `timestamp` is taken once at construction. Context can only grow through
/// [`AppError::with_merged_context`], which consumes the value and returns
/// the augmented copy.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    message: String,
    code: String,
    severity: Severity,
    context: ErrorContext,
    recoverable: bool,
    timestamp: DateTime<Utc>,
    kind: AppErrorKind,
}

impl AppError {
    /// Base error with every default: `UNKNOWN_ERROR`, `MEDIUM`, empty context, recoverable
    pub fn new(message: impl Into<String>) -> Self {
        AppErrorBuilder::new(message).build()
    }

    /// Start building a base error with explicit overrides
    pub fn builder(message: impl Into<String>) -> AppErrorBuilder {
        AppErrorBuilder::new(message)
    }

    /// Storage error classified from the raw failure's message
    ///
    /// The raw message is stored under `originalError` and a driver code,
    /// if present, under `sqlCode`. Storage errors are recoverable unless
    /// they classify as `CRITICAL`.
    pub fn storage(message: impl Into<String>, raw: &RawFailure, context: ErrorContext) -> Self {
        let classification = classifier::classify(raw.message());
        let mut context = context;
        context.insert(ORIGINAL_ERROR_KEY, raw.message());
        if let Some(code) = raw.code() {
            context.insert(SQL_CODE_KEY, code);
        }

        Self {
            message: message.into(),
            code: classification.code.as_str().to_string(),
            severity: classification.severity,
            context,
            recoverable: classification.severity != Severity::Critical,
            timestamp: Utc::now(),
            kind: AppErrorKind::Storage {
                code: classification.code,
            },
        }
    }

    /// Input validation failure on `field`
    pub fn validation(
        message: impl Into<String>,
        field: impl Into<String>,
        validation_rule: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        let field = field.into();
        let validation_rule = validation_rule.into();
        let context = context
            .with(FIELD_KEY, field.clone())
            .with(VALIDATION_RULE_KEY, validation_rule.clone());

        Self {
            message: message.into(),
            code: codes::VALIDATION_ERROR.to_string(),
            severity: Severity::Medium,
            context,
            recoverable: true,
            timestamp: Utc::now(),
            kind: AppErrorKind::Validation {
                field,
                validation_rule,
            },
        }
    }

    /// Business rule violation with a caller-chosen code
    pub fn business_rule(
        message: impl Into<String>,
        code: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            severity: Severity::High,
            context,
            recoverable: true,
            timestamp: Utc::now(),
            kind: AppErrorKind::BusinessRule,
        }
    }

    /// Business rule violation with the generic `BUSINESS_LOGIC_ERROR` code
    pub fn business_rule_default(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::business_rule(message, codes::BUSINESS_LOGIC_ERROR, context)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    pub fn is_recoverable(&self) -> bool {
        self.recoverable
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> &AppErrorKind {
        &self.kind
    }

    pub fn is_storage(&self) -> bool {
        matches!(self.kind, AppErrorKind::Storage { .. })
    }

    pub fn storage_code(&self) -> Option<StorageCode> {
        match self.kind {
            AppErrorKind::Storage { code } => Some(code),
            _ => None,
        }
    }

    /// Field name for validation errors
    pub fn field(&self) -> Option<&str> {
        match &self.kind {
            AppErrorKind::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn validation_rule(&self) -> Option<&str> {
        match &self.kind {
            AppErrorKind::Validation {
                validation_rule, ..
            } => Some(validation_rule),
            _ => None,
        }
    }

    /// Return this error with `extra` shallow-merged into its context
    pub fn with_merged_context(mut self, extra: &ErrorContext) -> Self {
        self.context.merge(extra);
        self
    }

    /// JSON payload used in structured log records
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({
                "message": self.message,
                "code": self.code,
                "severity": self.severity.as_str(),
            })
        })
    }
}

/// Builder for general errors
#[derive(Debug, Clone)]
pub struct AppErrorBuilder {
    message: String,
    code: String,
    severity: Severity,
    context: ErrorContext,
    recoverable: bool,
}

impl AppErrorBuilder {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: codes::UNKNOWN_ERROR.to_string(),
            severity: Severity::default(),
            context: ErrorContext::new(),
            recoverable: true,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }

    pub fn context_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.context.insert(key, value);
        self
    }

    pub fn recoverable(mut self, recoverable: bool) -> Self {
        self.recoverable = recoverable;
        self
    }

    pub fn build(self) -> AppError {
        AppError {
            message: self.message,
            code: self.code,
            severity: self.severity,
            context: self.context,
            recoverable: self.recoverable,
            timestamp: Utc::now(),
            kind: AppErrorKind::General,
        }
    }
}
