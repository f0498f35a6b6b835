//! Timeout enforcement.
//!
//! Uses Tokio's timeout facilities. An elapsed deadline becomes
//! `NetworkError::Timeout`, which the retry policy treats as transient.

use std::future::Future;
use std::time::Duration;

use crate::http::error::NetworkError;

/// Await `fut`, failing with `NetworkError::Timeout` once `limit` elapses.
pub async fn with_timeout<T, Fut>(limit: Duration, fut: Fut) -> Result<T, NetworkError>
where
    Fut: Future<Output = Result<T, NetworkError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(NetworkError::Timeout(limit.as_millis() as u64)),
    }
}
