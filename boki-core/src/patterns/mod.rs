//! Recovery patterns for transient storage failures

pub mod lock_retry;

pub use lock_retry::{
    recover_from_database_lock, recover_from_database_lock_with, BackoffStrategy, LockRecovery,
    LockRetryConfig,
};
