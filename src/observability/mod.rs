//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http client, store, hooks produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges, histograms)
//! ```
//!
//! # Design Decisions
//! - Request ID flows into every request log line
//! - The library only records metrics; installing an exporter is the host's job

pub mod logging;
pub mod metrics;
