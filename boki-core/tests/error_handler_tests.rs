//! End-to-end tests for dispatch, recovery and user messaging

use boki_core::context;
use boki_core::error::codes;
use boki_core::user_messages::FALLBACK_MESSAGE;
use boki_core::{
    listener_fn, recover_from_database_lock, recover_from_database_lock_with,
    safe_async_operation, user_friendly_message, AppError, AppErrorKind, ErrorContext,
    ErrorDispatcher, ErrorReporter, RawFailure, Severity, StorageCode,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_generic_error_is_general() {
    let dispatcher = ErrorDispatcher::new();
    let error = dispatcher.handle("Generic error message", None);

    assert_eq!(error.code(), codes::GENERAL_ERROR);
    assert_eq!(error.message(), "Generic error message");
    assert_eq!(error.severity(), Severity::Medium);
}

#[test]
fn test_storage_keyword_yields_storage_error() {
    let dispatcher = ErrorDispatcher::new();
    let error = dispatcher.handle("database connection failed", None);

    assert!(error.is_storage());
    assert_eq!(error.code(), "DB_GENERAL_ERROR");
    assert_eq!(error.storage_code(), Some(StorageCode::General));
    assert_eq!(
        error.context().get_str("originalError"),
        Some("database connection failed")
    );
}

#[test]
fn test_database_error_carries_operation_and_context() {
    let dispatcher = ErrorDispatcher::new();
    let error = dispatcher.handle_database_error(
        "SQLITE_BUSY: database is locked",
        "insertQuestion",
        Some(&context! { "questionId" => "Q001" }),
    );

    assert_eq!(error.code(), "DB_LOCKED");
    assert_eq!(error.severity(), Severity::Critical);
    assert_eq!(error.context().get_str("operation"), Some("insertQuestion"));
    assert_eq!(error.context().get_str("questionId"), Some("Q001"));
}

#[tokio::test]
async fn test_lock_retry_succeeds_on_third_call() {
    let calls = Arc::new(AtomicU32::new(0));
    let c = calls.clone();

    let value = recover_from_database_lock_with(
        move || {
            let n = c.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err(RawFailure::new("database is locked"))
                } else {
                    Ok(n)
                }
            }
        },
        3,
        Duration::from_millis(10),
    )
    .await
    .unwrap();

    assert_eq!(value, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_lock_retry_exhaustion() {
    let calls = Arc::new(AtomicU32::new(0));
    let c = calls.clone();

    let failure = recover_from_database_lock_with(
        move || {
            c.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(RawFailure::new("database is locked")) }
        },
        2,
        Duration::from_millis(10),
    )
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let error = failure.as_app_error().expect("exhaustion yields a classified error");
    assert!(error.is_storage());
    assert_eq!(error.code(), "DB_LOCKED");
}

#[tokio::test]
async fn test_non_lock_failure_propagates_immediately() {
    let calls = Arc::new(AtomicU32::new(0));
    let c = calls.clone();

    let failure = recover_from_database_lock(move || {
        c.fetch_add(1, Ordering::SeqCst);
        async { Err::<(), _>(RawFailure::new("syntax error")) }
    })
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(failure.message(), "syntax error");
    assert!(failure.as_app_error().is_none());
}

#[tokio::test]
async fn test_classified_errors_pass_through_retry_unchanged() {
    let failure = recover_from_database_lock(|| async {
        Err::<(), _>(AppError::business_rule_default(
            "debits and credits differ",
            ErrorContext::new(),
        ))
    })
    .await
    .unwrap_err();

    let error = failure.as_app_error().unwrap();
    assert_eq!(error.code(), codes::BUSINESS_LOGIC_ERROR);
    assert_eq!(error.kind(), &AppErrorKind::BusinessRule);
}

#[test]
fn test_global_dispatcher_is_singleton() {
    assert!(std::ptr::eq(ErrorDispatcher::global(), ErrorDispatcher::global()));
}

#[test]
fn test_handle_is_idempotent_for_classified_errors() {
    let dispatcher = ErrorDispatcher::new();
    let extra = context! { "journalId" => "J-7" };
    let original = AppError::validation("amount must be positive", "amount", "positive", ErrorContext::new());

    let once = dispatcher.handle(original.clone(), Some(&extra));
    let twice = dispatcher.handle(once.clone(), Some(&extra));

    assert_eq!(once.context(), twice.context());
    assert_eq!(twice.code(), codes::VALIDATION_ERROR);
}

#[test]
fn test_removed_listener_is_not_invoked() {
    let dispatcher = ErrorDispatcher::new();
    let seen = Arc::new(AtomicU32::new(0));
    let s = seen.clone();
    let listener = listener_fn(move |_| {
        s.fetch_add(1, Ordering::SeqCst);
    });

    dispatcher.add_error_listener(listener.clone());
    dispatcher.handle("first", None);
    assert!(dispatcher.remove_error_listener(&listener));
    dispatcher.handle("second", None);

    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failing_listener_does_not_block_others() {
    let dispatcher = ErrorDispatcher::new();
    let codes_seen = Arc::new(Mutex::new(Vec::new()));

    dispatcher.add_error_listener(listener_fn(|_| panic!("toast rendering failed")));
    dispatcher.add_error_listener(Arc::new(|_: &AppError| -> anyhow::Result<()> {
        anyhow::bail!("listener unavailable")
    }));
    let sink = codes_seen.clone();
    dispatcher.add_error_listener(listener_fn(move |error| {
        sink.lock().push(error.code().to_string());
    }));

    let error = dispatcher.handle("no such table: journal_entries", None);

    assert_eq!(error.code(), "DB_TABLE_NOT_FOUND");
    assert_eq!(*codes_seen.lock(), vec!["DB_TABLE_NOT_FOUND".to_string()]);
}

#[tokio::test]
async fn test_safe_operation_reports_through_injected_reporter() {
    let reporter: Arc<dyn ErrorReporter> = ErrorDispatcher::shared();
    let seen = Arc::new(Mutex::new(None));
    let s = seen.clone();
    reporter.add_error_listener(listener_fn(move |error| {
        *s.lock() = Some(error.code().to_string());
    }));

    let result: Result<(), AppError> = safe_async_operation(
        reporter.as_ref(),
        || async { Err(RawFailure::new("FOREIGN KEY constraint failed on table ledger")) },
        Some(&context! { "screen" => "ledger" }),
    )
    .await;

    let error = result.unwrap_err();
    assert_eq!(error.code(), "DB_FK_VIOLATION");
    assert_eq!(error.context().get_str("screen"), Some("ledger"));
    assert_eq!(seen.lock().as_deref(), Some("DB_FK_VIOLATION"));
}

#[test]
fn test_constraint_text_without_storage_keyword_is_general() {
    let dispatcher = ErrorDispatcher::new();
    let error = dispatcher.handle("FOREIGN KEY constraint failed", None);

    assert!(!error.is_storage());
    assert_eq!(error.code(), codes::GENERAL_ERROR);
    assert_eq!(error.message(), "FOREIGN KEY constraint failed");

    let error = dispatcher.handle("FOREIGN KEY constraint failed on table ledger", None);
    assert_eq!(error.code(), "DB_FK_VIOLATION");
}

#[test]
fn test_every_dispatched_error_has_a_user_message() {
    let dispatcher = ErrorDispatcher::new();
    let messages = [
        "Generic error message",
        "database is locked",
        "no such table: accounts",
        "FOREIGN KEY constraint failed",
        "SQL syntax error",
        "sqlite disk I/O error",
    ];

    for raw in messages {
        let error = dispatcher.handle(raw, None);
        let text = user_friendly_message(&error);
        assert!(!text.is_empty());
        assert!(!text.contains(raw));
    }

    let custom = AppError::builder("odd").code("SOMETHING_NEW").build();
    assert_eq!(user_friendly_message(&custom), FALLBACK_MESSAGE);
}
