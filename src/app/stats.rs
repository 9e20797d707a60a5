//! Download statistics tracking
//!
//! The aggregator holds three independent atomic counters shared by every
//! worker. Increments never lock. A snapshot reads each field atomically but
//! the three reads are not a joint snapshot, which is fine for a progress
//! line and never used for correctness decisions.
//!
//! Rendering goes through the [`ProgressSink`] trait so the pool does not
//! care whether progress lands on a terminal, in a log, or nowhere.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::app::models::Counters;

/// Process-wide success/failure/total counters
#[derive(Debug)]
pub struct StatsAggregator {
    total: AtomicU64,
    success: AtomicU64,
    failures: AtomicU64,
    started: Instant,
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsAggregator {
    /// Create zeroed counters; the elapsed clock starts now
    pub fn new() -> Self {
        Self {
            total: AtomicU64::new(0),
            success: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Announce `count` more items before they are queued
    pub fn add_total(&self, count: u64) {
        self.total.fetch_add(count, Ordering::SeqCst);
    }

    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    /// Read the counters
    ///
    /// `total` is read last so that `success + failures <= total` holds for
    /// every snapshot taken after the total was announced.
    pub fn snapshot(&self) -> Counters {
        let success = self.success.load(Ordering::SeqCst);
        let failures = self.failures.load(Ordering::SeqCst);
        let total = self.total.load(Ordering::SeqCst);
        Counters {
            total,
            success,
            failures,
        }
    }

    /// Time since the aggregator was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Render the progress line
    pub fn render_line(&self) -> String {
        let counters = self.snapshot();
        format!(
            "total: {}, success: {}, failures: {}, time: {:?}",
            counters.total,
            counters.success,
            counters.failures,
            self.elapsed()
        )
    }
}

/// Destination for the live progress line
///
/// Called by workers after every completed item, so implementations must be
/// cheap and thread safe.
pub trait ProgressSink: Send + Sync {
    /// Redraw the progress line from the current counters
    fn render(&self, stats: &StatsAggregator);

    /// Called once after the pool has drained
    fn finish(&self, _stats: &StatsAggregator) {}
}

/// Progress sink that discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn render(&self, _stats: &StatsAggregator) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = StatsAggregator::new();
        assert_eq!(stats.snapshot(), Counters::default());
    }

    #[test]
    fn test_record_success_and_failure() {
        let stats = StatsAggregator::new();
        stats.add_total(3);
        stats.record_success();
        stats.record_success();
        stats.record_failure();

        let counters = stats.snapshot();
        assert_eq!(
            counters,
            Counters {
                total: 3,
                success: 2,
                failures: 1
            }
        );
        assert!(counters.is_complete());
    }

    #[test]
    fn test_render_line_format() {
        let stats = StatsAggregator::new();
        stats.add_total(5);
        stats.record_success();
        stats.record_failure();

        let line = stats.render_line();
        assert!(line.starts_with("total: 5, success: 1, failures: 1, time: "));
    }

    #[test]
    fn test_concurrent_increments() {
        let stats = Arc::new(StatsAggregator::new());
        stats.add_total(8000);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        if i % 2 == 0 {
                            stats.record_success();
                        } else {
                            stats.record_failure();
                        }
                        let snapshot = stats.snapshot();
                        assert!(snapshot.processed() <= snapshot.total);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let counters = stats.snapshot();
        assert_eq!(counters.success, 4000);
        assert_eq!(counters.failures, 4000);
        assert!(counters.is_complete());
    }
}
