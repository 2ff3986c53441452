//! Task-local trace id for the current request.
//!
//! `RequestTrace` opens the scope; error rendering and extractors read it so
//! Problem Details responses carry the same id as the request's logs.

use std::cell::RefCell;

use tokio::task_local;

pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Current trace id, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
        .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}
