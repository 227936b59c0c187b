//! Shared utilities for use cases.
//!
//! Cancellation checking and cancellable awaiting for the turn loop.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Whether cancellation has been requested.
pub(crate) fn is_cancelled(token: Option<&CancellationToken>) -> bool {
    token.is_some_and(|t| t.is_cancelled())
}

/// Await `fut` unless the token fires first.
///
/// Returns `None` on cancellation; the future is dropped at its current
/// suspension point.
pub(crate) async fn until_cancelled<F: Future>(
    token: Option<&CancellationToken>,
    fut: F,
) -> Option<F::Output> {
    match token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => None,
                out = fut => Some(out),
            }
        }
        None => Some(fut.await),
    }
}
