//! Retry logic.
//!
//! # Responsibilities
//! - Determine if a failure is retryable
//! - Execute retries with a fixed delay
//! - Bound attempts by an explicit retry count

use std::future::Future;
use std::time::Duration;

use crate::http::error::NetworkError;
use crate::observability::metrics;

/// Bounded, fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub retries: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 1,
            delay: Duration::from_millis(300),
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// Whether `attempt` (1-based) may be followed by another one after `err`.
    pub fn should_retry(&self, attempt: u32, err: &NetworkError) -> bool {
        attempt <= self.retries && err.is_retriable()
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, NetworkError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, NetworkError>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if self.should_retry(attempt, &err) => {
                    tracing::info!(
                        attempt,
                        delay = ?self.delay,
                        error = %err,
                        "Retrying request"
                    );
                    metrics::record_retry();
                    tokio::time::sleep(self.delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
