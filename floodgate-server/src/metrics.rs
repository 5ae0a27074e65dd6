//! Admission metrics for observability
//!
//! Lightweight metrics collection using atomic counters. Designed for
//! minimal overhead and zero allocations in the hot path.

use crate::actor::LimiterStats;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Core metrics collected by the server
pub struct Metrics {
    /// Server start time
    start_time: Instant,

    /// Total requests seen by the middleware
    pub total_requests: AtomicU64,

    /// Admission decisions
    pub requests_allowed: AtomicU64,
    pub requests_denied: AtomicU64,

    /// Requests carrying no usable client identifier
    pub requests_unidentified: AtomicU64,

    /// Internal errors (limiter unavailable)
    pub requests_errors: AtomicU64,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            total_requests: AtomicU64::new(0),
            requests_allowed: AtomicU64::new(0),
            requests_denied: AtomicU64::new(0),
            requests_unidentified: AtomicU64::new(0),
            requests_errors: AtomicU64::new(0),
        }
    }

    /// Record an admitted request
    pub fn record_allowed(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.requests_allowed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a throttled request
    pub fn record_denied(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.requests_denied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request with no usable client identifier
    pub fn record_unidentified(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.requests_unidentified.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an internal error
    pub fn record_error(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.requests_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics in Prometheus text format
    ///
    /// Registry gauges come from the limiter actor's [`LimiterStats`].
    pub fn export_prometheus(&self, stats: &LimiterStats) -> String {
        let mut output = String::with_capacity(1024);

        output.push_str("# HELP floodgate_uptime_seconds Time since server start in seconds\n");
        output.push_str("# TYPE floodgate_uptime_seconds gauge\n");
        output.push_str(&format!(
            "floodgate_uptime_seconds {}\n\n",
            self.uptime_seconds()
        ));

        output.push_str("# HELP floodgate_requests_total Total requests seen by the middleware\n");
        output.push_str("# TYPE floodgate_requests_total counter\n");
        output.push_str(&format!(
            "floodgate_requests_total {}\n\n",
            self.total_requests.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP floodgate_requests_allowed Requests forwarded upstream\n");
        output.push_str("# TYPE floodgate_requests_allowed counter\n");
        output.push_str(&format!(
            "floodgate_requests_allowed {}\n\n",
            self.requests_allowed.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP floodgate_requests_denied Requests rejected with 429\n");
        output.push_str("# TYPE floodgate_requests_denied counter\n");
        output.push_str(&format!(
            "floodgate_requests_denied {}\n\n",
            self.requests_denied.load(Ordering::Relaxed)
        ));

        output.push_str(
            "# HELP floodgate_requests_unidentified Requests rejected with 400 for lacking a client identifier\n",
        );
        output.push_str("# TYPE floodgate_requests_unidentified counter\n");
        output.push_str(&format!(
            "floodgate_requests_unidentified {}\n\n",
            self.requests_unidentified.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP floodgate_requests_errors Internal errors\n");
        output.push_str("# TYPE floodgate_requests_errors counter\n");
        output.push_str(&format!(
            "floodgate_requests_errors {}\n\n",
            self.requests_errors.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP floodgate_active_keys Clients currently holding a bucket\n");
        output.push_str("# TYPE floodgate_active_keys gauge\n");
        output.push_str(&format!("floodgate_active_keys {}\n\n", stats.active_keys));

        output.push_str("# HELP floodgate_evictions_total Idle buckets dropped since startup\n");
        output.push_str("# TYPE floodgate_evictions_total counter\n");
        output.push_str(&format!("floodgate_evictions_total {}\n", stats.evictions));

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
