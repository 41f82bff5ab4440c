//! Best-effort side-effect helpers.
//!
//! Some operations must never fail or delay the primary path they ride on:
//! cache hit-count increments, per-member notification sends inside a
//! fan-out loop. These helpers make that contract explicit instead of
//! scattering ignored results through the codebase.

use crate::CareResult;
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::warn;

/// Spawns `fut` onto the runtime, logging its failure instead of
/// propagating it. The caller does not wait for completion.
pub fn spawn_logged<F>(operation: &'static str, fut: F) -> JoinHandle<()>
where
    F: Future<Output = CareResult<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = fut.await {
            warn!(operation, error = %e, "best-effort operation failed");
        }
    })
}

/// Awaits `fut`, logging and discarding its failure.
///
/// Returns `Some` on success so callers that care (e.g. loop counters) can
/// still observe the outcome.
pub async fn log_on_error<T, F>(operation: &'static str, fut: F) -> Option<T>
where
    F: Future<Output = CareResult<T>>,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(operation, error = %e, "best-effort operation failed");
            None
        }
    }
}
