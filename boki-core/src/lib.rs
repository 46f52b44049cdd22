//! Error classification, dispatch and recovery for the boki application
//!
//! Failures raised anywhere in the application are funneled through an
//! [`ErrorDispatcher`], which turns them into structured [`AppError`]s,
//! logs them and broadcasts them to registered listeners. Transient
//! database lock contention can be retried with [`recover_from_database_lock`],
//! and [`user_friendly_message`] maps a classified error to display text.

pub mod common;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod observability;
pub mod patterns;
pub mod user_messages;

pub use common::{safe_async_operation, safe_operation};
pub use config::{Config, ConfigBuilder};
pub use dispatcher::{listener_fn, ErrorDispatcher, ErrorListener, ErrorReporter, ListenerRef};
pub use error::{
    AppError, AppErrorKind, BokiError, BokiResult, ErrorContext, Failure, RawFailure, Severity,
    StorageCode,
};
pub use patterns::{
    recover_from_database_lock, recover_from_database_lock_with, LockRecovery, LockRetryConfig,
};
pub use user_messages::user_friendly_message;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
