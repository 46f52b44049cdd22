//! Observers notified of every dispatched error

use crate::error::AppError;
use std::sync::Arc;

/// Receives every error the dispatcher classifies
///
/// Returning `Err` (or panicking) only affects this listener: the
/// dispatcher logs the failure at WARN and moves on to the next one.
pub trait ErrorListener: Send + Sync {
    fn on_error(&self, error: &AppError) -> anyhow::Result<()>;
}

impl<F> ErrorListener for F
where
    F: Fn(&AppError) -> anyhow::Result<()> + Send + Sync,
{
    fn on_error(&self, error: &AppError) -> anyhow::Result<()> {
        self(error)
    }
}

/// Shared handle to a registered listener; identity is the allocation
pub type ListenerRef = Arc<dyn ErrorListener>;

/// Wrap an infallible closure as a listener
pub fn listener_fn<F>(f: F) -> ListenerRef
where
    F: Fn(&AppError) + Send + Sync + 'static,
{
    Arc::new(move |error: &AppError| -> anyhow::Result<()> {
        f(error);
        Ok(())
    })
}
