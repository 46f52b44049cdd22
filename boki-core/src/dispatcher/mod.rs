//! Central error dispatch
//!
//! The [`ErrorDispatcher`] is the single entry point failures pass through
//! before reaching presentation code. For each failure it:
//!
//! 1. normalizes it into an [`AppError`] (classifying storage failures),
//! 2. writes a structured log record at ERROR or WARN depending on severity,
//! 3. notifies every registered [`ErrorListener`] in registration order,
//! 4. returns the classified error to the caller.
//!
//! The dispatcher is meant to be built once at the composition root and
//! shared as `Arc<dyn ErrorReporter>`. [`ErrorDispatcher::global`] exists
//! for call sites without access to one.

pub mod listener;

pub use listener::{listener_fn, ErrorListener, ListenerRef};

use crate::common::panic_message;
use crate::error::app_error::OPERATION_KEY;
use crate::error::{classifier, codes, AppError, ErrorContext, Failure, LogLevel, Severity};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, warn};

/// Fixed tag attached to every dispatcher log record
pub const LOG_TAG: &str = "ErrorDispatcher";

const STORAGE_FAILURE_MESSAGE: &str = "Database operation failed";

static GLOBAL: Lazy<ErrorDispatcher> = Lazy::new(ErrorDispatcher::new);

/// The narrow interface collaborators depend on
pub trait ErrorReporter: Send + Sync {
    /// Normalize, log and broadcast a failure
    fn handle(&self, failure: Failure, extra: Option<&ErrorContext>) -> AppError;

    /// Like [`handle`](Self::handle) but always yields a Storage Error tagged with `operation`
    fn handle_database_error(
        &self,
        failure: Failure,
        operation: &str,
        extra: Option<&ErrorContext>,
    ) -> AppError;

    fn add_error_listener(&self, listener: ListenerRef);

    /// Remove one registration of `listener`; returns whether one was found
    fn remove_error_listener(&self, listener: &ListenerRef) -> bool;
}

/// Structured log record emitted for every dispatched error
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub tag: &'static str,
    pub level: LogLevel,
    pub severity: Severity,
    pub error: AppError,
}

impl LogRecord {
    pub fn for_error(error: &AppError) -> Self {
        Self {
            tag: LOG_TAG,
            level: error.severity().log_level(),
            severity: error.severity(),
            error: error.clone(),
        }
    }

    /// Emit this record through `tracing`
    pub fn emit(&self) {
        let payload = self.error.to_json();
        match self.level {
            LogLevel::Error => error!(
                tag = self.tag,
                log_level = %self.level,
                severity = %self.severity,
                code = %self.error.code(),
                recoverable = self.error.is_recoverable(),
                payload = %payload,
                "[{}] {}",
                self.tag,
                self.error.message()
            ),
            LogLevel::Warn => warn!(
                tag = self.tag,
                log_level = %self.level,
                severity = %self.severity,
                code = %self.error.code(),
                recoverable = self.error.is_recoverable(),
                payload = %payload,
                "[{}] {}",
                self.tag,
                self.error.message()
            ),
        }
    }
}

/// Classify a failure without logging or notifying anyone
///
/// - an [`AppError`] keeps its classification and gets `extra` merged in
/// - a raw failure mentioning the storage layer becomes a Storage Error
/// - anything else becomes a `GENERAL_ERROR`
pub fn normalize(failure: Failure, extra: Option<&ErrorContext>) -> AppError {
    match failure {
        Failure::App(app) => match extra {
            Some(extra) => app.with_merged_context(extra),
            None => app,
        },
        Failure::Raw(raw) if classifier::is_storage_related(raw.message()) => {
            let storage = AppError::storage(STORAGE_FAILURE_MESSAGE, &raw, ErrorContext::new());
            match extra {
                Some(extra) => storage.with_merged_context(extra),
                None => storage,
            }
        }
        Failure::Raw(raw) => AppError::builder(raw.message())
            .code(codes::GENERAL_ERROR)
            .severity(Severity::Medium)
            .context(extra.cloned().unwrap_or_default())
            .build(),
    }
}

/// Classify a failure as a storage error raised by `operation`
pub fn normalize_storage(
    failure: Failure,
    operation: &str,
    extra: Option<&ErrorContext>,
) -> AppError {
    let mut context = ErrorContext::new().with(OPERATION_KEY, operation);
    if let Some(extra) = extra {
        context.merge(extra);
    }

    match failure {
        Failure::App(app) if app.is_storage() => app.with_merged_context(&context),
        other => {
            let raw = other.into_raw();
            let message = format!("{}: {}", STORAGE_FAILURE_MESSAGE, operation);
            AppError::storage(message, &raw, ErrorContext::new()).with_merged_context(&context)
        }
    }
}

/// Process-wide error dispatcher with an observer registry
pub struct ErrorDispatcher {
    listeners: RwLock<Vec<ListenerRef>>,
}

impl ErrorDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Shared instance for call sites without a composition root
    ///
    /// Every call returns the same instance.
    pub fn global() -> &'static ErrorDispatcher {
        &GLOBAL
    }

    /// Fresh dispatcher behind the reporter interface, for composition roots
    pub fn shared() -> Arc<dyn ErrorReporter> {
        Arc::new(Self::new())
    }

    pub fn handle(&self, failure: impl Into<Failure>, extra: Option<&ErrorContext>) -> AppError {
        self.dispatch(normalize(failure.into(), extra))
    }

    pub fn handle_database_error(
        &self,
        failure: impl Into<Failure>,
        operation: &str,
        extra: Option<&ErrorContext>,
    ) -> AppError {
        self.dispatch(normalize_storage(failure.into(), operation, extra))
    }

    pub fn add_error_listener(&self, listener: ListenerRef) {
        self.listeners.write().push(listener);
    }

    pub fn remove_error_listener(&self, listener: &ListenerRef) -> bool {
        let mut listeners = self.listeners.write();
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    fn dispatch(&self, error: AppError) -> AppError {
        LogRecord::for_error(&error).emit();
        self.notify(&error);
        error
    }

    fn notify(&self, error: &AppError) {
        // Snapshot so listeners may (un)register without deadlocking
        let listeners: Vec<ListenerRef> = self.listeners.read().clone();

        for (index, listener) in listeners.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener.on_error(error))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    tag = LOG_TAG,
                    listener = index,
                    code = %error.code(),
                    "[{}] listener failed: {:#}",
                    LOG_TAG,
                    e
                ),
                Err(payload) => warn!(
                    tag = LOG_TAG,
                    listener = index,
                    code = %error.code(),
                    "[{}] listener panicked: {}",
                    LOG_TAG,
                    panic_message(payload.as_ref())
                ),
            }
        }
    }
}

impl Default for ErrorDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorDispatcher")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ErrorReporter for ErrorDispatcher {
    fn handle(&self, failure: Failure, extra: Option<&ErrorContext>) -> AppError {
        ErrorDispatcher::handle(self, failure, extra)
    }

    fn handle_database_error(
        &self,
        failure: Failure,
        operation: &str,
        extra: Option<&ErrorContext>,
    ) -> AppError {
        ErrorDispatcher::handle_database_error(self, failure, operation, extra)
    }

    fn add_error_listener(&self, listener: ListenerRef) {
        ErrorDispatcher::add_error_listener(self, listener)
    }

    fn remove_error_listener(&self, listener: &ListenerRef) -> bool {
        ErrorDispatcher::remove_error_listener(self, listener)
    }
}
