//! Per-request deadline

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use fa_core::errors::DomainResult;

use crate::handlers::{ApiError, ApiResult};

/// Run a service call, giving up after `limit`
///
/// On expiry the call's future is dropped, which cancels any store
/// operation still in flight.
pub async fn within<F, T>(limit: Duration, call: F) -> ApiResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "Request deadline exceeded");
            Err(ApiError::Timeout)
        }
    }
}
