//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → timeouts.rs (enforce per-request deadline)
//!     → On failure: retries.rs (check if retriable, wait fixed delay, retry)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every backend call has a deadline
//! - Retries are bounded by an explicit count with a fixed delay
//! - Only transient failures are retried (transport, timeout, 5xx)

pub mod retries;
pub mod timeouts;

pub use retries::RetryPolicy;
pub use timeouts::with_timeout;
