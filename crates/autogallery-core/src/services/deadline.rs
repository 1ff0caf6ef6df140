//! Deadlines for store calls.

use std::future::Future;
use std::time::Duration;

use crate::ports::{CoreError, RepositoryError};

/// Run a record store call under `limit`, mapping failures to `CoreError`.
///
/// An elapsed deadline becomes `StorageUnavailable` for `step`; the call is
/// never retried here.
pub async fn within<T, F>(step: &'static str, limit: Duration, call: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(|e| CoreError::from_repository(step, e)),
        Err(_) => Err(timed_out(step, limit)),
    }
}

pub fn timed_out(step: &'static str, limit: Duration) -> CoreError {
    CoreError::StorageUnavailable {
        step,
        reason: format!("timed out after {} ms", limit.as_millis()),
    }
}
