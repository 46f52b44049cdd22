//! Run an operation and turn any failure into a dispatched [`AppError`]
//!
//! These wrappers never propagate: a returned error or a panic inside the
//! operation is routed through [`ErrorReporter::handle`] (so it is logged and
//! observers are notified) and handed back as `Err`.

use super::panic_message;
use crate::dispatcher::ErrorReporter;
use crate::error::{AppError, ErrorContext, Failure, RawFailure};
use futures::FutureExt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

/// Await `operation`, reporting its failure instead of propagating it
pub async fn safe_async_operation<T, E, Fut>(
    reporter: &dyn ErrorReporter,
    operation: impl FnOnce() -> Fut,
    extra: Option<&ErrorContext>,
) -> Result<T, AppError>
where
    Fut: Future<Output = Result<T, E>>,
    E: Into<Failure>,
{
    let outcome = AssertUnwindSafe(async move { operation().await })
        .catch_unwind()
        .await;
    settle(reporter, outcome, extra)
}

/// Synchronous twin of [`safe_async_operation`]
pub fn safe_operation<T, E>(
    reporter: &dyn ErrorReporter,
    operation: impl FnOnce() -> Result<T, E>,
    extra: Option<&ErrorContext>,
) -> Result<T, AppError>
where
    E: Into<Failure>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(operation));
    settle(reporter, outcome, extra)
}

fn settle<T, E>(
    reporter: &dyn ErrorReporter,
    outcome: std::thread::Result<Result<T, E>>,
    extra: Option<&ErrorContext>,
) -> Result<T, AppError>
where
    E: Into<Failure>,
{
    let failure = match outcome {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(err)) => err.into(),
        Err(payload) => Failure::Raw(RawFailure::new(panic_message(payload.as_ref()))),
    };
    Err(reporter.handle(failure, extra))
}
