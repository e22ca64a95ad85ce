//! Query and transaction counters
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe, Relaxed ordering

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by every transaction of one database
#[derive(Debug, Default)]
pub struct QueryMetrics {
    /// Queries that completed
    queries_executed: AtomicU64,
    /// Queries that failed index resolution
    queries_rejected: AtomicU64,
    /// Index entries visited by scans
    entries_scanned: AtomicU64,
    /// Records handed back to callers
    records_returned: AtomicU64,
    /// Published write transactions
    commits: AtomicU64,
    /// Discarded write transactions
    aborts: AtomicU64,
}

impl QueryMetrics {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed query
    pub fn record_query(&self, scanned: u64, returned: u64) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.entries_scanned.fetch_add(scanned, Ordering::Relaxed);
        self.records_returned.fetch_add(returned, Ordering::Relaxed);
    }

    /// Increment rejected queries
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment commits
    pub fn increment_commits(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment aborts
    pub fn increment_aborts(&self) {
        self.aborts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all counters as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            entries_scanned: self.entries_scanned.load(Ordering::Relaxed),
            records_returned: self.records_returned.load(Ordering::Relaxed),
            commits: self.commits.load(Ordering::Relaxed),
            aborts: self.aborts.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub entries_scanned: u64,
    pub records_returned: u64,
    pub commits: u64,
    pub aborts: u64,
}
