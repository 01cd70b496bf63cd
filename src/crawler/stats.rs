//! Concurrency-safe scrape counters
//!
//! Workers increment these from up to `worker-count` tasks concurrently.
//! The counters are independent of each other, so plain atomics suffice;
//! the final read happens only after the worker pool has been joined.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the worker-phase scrape outcomes of one crawl run
#[derive(Debug, Default)]
pub struct ScrapeStats {
    attempted: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

/// A point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub attempted: u64,
    pub succeeded: u64,
    pub failed: u64,
}

impl ScrapeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a worker popped a work item
    pub fn record_attempt(&self) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successfully scraped and persisted page
    pub fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed scrape (fetch, parse, or persist)
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads all three counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            attempted: self.attempted.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
