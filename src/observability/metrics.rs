//! Metrics collection.
//!
//! # Metrics
//! - `site_http_requests_total` (counter): requests by method, status
//! - `site_http_request_duration_seconds` (histogram): latency distribution
//! - `site_http_retries_total` (counter): retry attempts
//! - `site_cache_hits_total` / `site_cache_misses_total` (counter): by resource
//! - `site_inflight_joins_total` (counter): callers attached to a pending request
//! - `site_cache_entries` (gauge): current cache size, by store

use std::time::Instant;

/// Record a completed request attempt. `status` is `None` for transport
/// failures and timeouts.
pub fn record_request(method: &str, status: Option<u16>, start_time: Instant) {
    let status = status.map_or_else(|| "none".to_string(), |s| s.to_string());
    let elapsed = start_time.elapsed().as_secs_f64();

    metrics::counter!(
        "site_http_requests_total",
        "method" => method.to_string(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!("site_http_request_duration_seconds", "method" => method.to_string())
        .record(elapsed);
}

pub fn record_retry() {
    metrics::counter!("site_http_retries_total").increment(1);
}

pub fn record_cache_hit(resource: &str) {
    metrics::counter!("site_cache_hits_total", "resource" => resource.to_string()).increment(1);
}

pub fn record_cache_miss(resource: &str) {
    metrics::counter!("site_cache_misses_total", "resource" => resource.to_string()).increment(1);
}

pub fn record_inflight_join(resource: &str) {
    metrics::counter!("site_inflight_joins_total", "resource" => resource.to_string())
        .increment(1);
}

/// Entries held by one store, labelled with the store's name.
pub fn record_cache_size(store: &str, size: usize) {
    metrics::gauge!("site_cache_entries", "store" => store.to_string()).set(size as f64);
}
