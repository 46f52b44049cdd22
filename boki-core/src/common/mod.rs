//! Common utilities shared across the crate
//!
//! This module provides the non-throwing boundary used by call sites that
//! prefer result values over propagation.

pub mod safe_operation;

pub use safe_operation::{safe_async_operation, safe_operation};

use std::any::Any;

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
