//! Counters collected over one export run.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for export runs
#[derive(Debug, Default)]
pub struct ExportMetrics {
    /// Successful HTTP exchanges by endpoint
    request_counts: RwLock<BTreeMap<String, u64>>,
    /// Pages consumed by the paginator
    pages: AtomicU64,
    /// Records accumulated across all pages
    records: AtomicU64,
    /// 429 responses seen
    rate_limit_hits: AtomicU64,
    /// Total time spent waiting on rate limits, in milliseconds
    rate_limit_wait_ms: AtomicU64,
}

impl ExportMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed request
    pub fn record_request(&self, endpoint: &str) {
        *self
            .request_counts
            .write()
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
    }

    /// Record a consumed page and its record count
    pub fn record_page(&self, records: usize) {
        self.pages.fetch_add(1, Ordering::Relaxed);
        self.records.fetch_add(records as u64, Ordering::Relaxed);
    }

    /// Record a rate limit hit and the mandated wait
    pub fn record_rate_limit(&self, wait: Duration) {
        self.rate_limit_hits.fetch_add(1, Ordering::Relaxed);
        self.rate_limit_wait_ms
            .fetch_add(wait.as_millis() as u64, Ordering::Relaxed);
    }

    /// Requests made to an endpoint
    pub fn requests_for(&self, endpoint: &str) -> u64 {
        self.request_counts
            .read()
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Total requests across endpoints
    pub fn total_requests(&self) -> u64 {
        self.request_counts.read().values().sum()
    }

    /// Pages consumed
    pub fn pages(&self) -> u64 {
        self.pages.load(Ordering::Relaxed)
    }

    /// Records accumulated
    pub fn records(&self) -> u64 {
        self.records.load(Ordering::Relaxed)
    }

    /// Rate limit hits
    pub fn rate_limit_hits(&self) -> u64 {
        self.rate_limit_hits.load(Ordering::Relaxed)
    }

    /// Time spent waiting on rate limits
    pub fn rate_limit_wait(&self) -> Duration {
        Duration::from_millis(self.rate_limit_wait_ms.load(Ordering::Relaxed))
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.request_counts.read().clone(),
            pages: self.pages(),
            records: self.records(),
            rate_limit_hits: self.rate_limit_hits(),
            rate_limit_wait: self.rate_limit_wait(),
        }
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Requests by endpoint
    pub requests: BTreeMap<String, u64>,
    /// Pages consumed
    pub pages: u64,
    /// Records accumulated
    pub records: u64,
    /// Rate limit hits
    pub rate_limit_hits: u64,
    /// Time spent waiting on rate limits
    pub rate_limit_wait: Duration,
}
