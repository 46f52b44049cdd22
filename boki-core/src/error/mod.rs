//! Error taxonomy and classification for boki-core
//!
//! This module defines the structured errors that flow between the storage
//! layer, the dispatcher and presentation code.
//!
//! ## Error Categories
//!
//! - **General**: unclassified failures, normalized to `GENERAL_ERROR`
//! - **Storage**: failures raised by the data-access layer, split by the
//!   [`classifier`] into lock contention, foreign-key violation, missing
//!   schema, syntax and general storage kinds
//! - **Validation**: rejected user input
//! - **Business rule**: domain rule violations with caller-chosen codes
//!
//! Raw failures from below the subsystem are [`RawFailure`] values and must be
//! normalized into an [`AppError`] before they reach presentation code.
//!
//! [`BokiError`] is reserved for the subsystem's own infrastructure
//! (configuration, API misuse).

pub mod app_error;
pub mod classifier;
pub mod codes;
pub mod constructors;
pub mod context;
pub mod conversions;
pub mod failure;
pub mod severity;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use app_error::{AppError, AppErrorBuilder, AppErrorKind};
pub use classifier::{classify, Classification};
pub use codes::StorageCode;
pub use context::ErrorContext;
pub use failure::{Failure, RawFailure};
pub use severity::{LogLevel, Severity};
pub use types::{format_errors, BokiError, BokiResult};
pub use validation::{ValidationIssue, ValidationReport};
