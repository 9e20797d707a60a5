//! Worker pool management and coordination
//!
//! One pool run starts a feeder task and exactly `concurrency` workers, then
//! waits on all of them. The feeder fills a bounded queue sized to the item
//! count, so it never blocks, and closes the queue by dropping the sender.
//! Closing the queue is the only termination signal workers ever see.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::core::DownloadWorker;
use super::retry::RetryExecutor;
use super::types::WorkerSummary;
use crate::app::failure_log::FailureLog;
use crate::app::models::{Counters, WorkItem};
use crate::app::stats::{NoProgress, ProgressSink, StatsAggregator};
use crate::errors::{QueueError, QueueResult};

/// Pool for running a batch of work items through concurrent workers
pub struct WorkerPool {
    /// Shared retry executor
    executor: Arc<RetryExecutor>,
    /// Shared failure log
    failure_log: Arc<FailureLog>,
    /// Shared counters
    stats: Arc<StatsAggregator>,
    /// Progress line redrawn after every item
    progress: Arc<dyn ProgressSink>,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("executor", &self.executor)
            .field("failure_log", &self.failure_log.path())
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}

impl WorkerPool {
    /// Create a new worker pool with progress rendering disabled
    pub fn new(
        executor: Arc<RetryExecutor>,
        failure_log: Arc<FailureLog>,
        stats: Arc<StatsAggregator>,
    ) -> Self {
        Self {
            executor,
            failure_log,
            stats,
            progress: Arc::new(NoProgress),
        }
    }

    /// Use `progress` to render the live progress line
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Process every item and wait for the pool to drain
    ///
    /// Returns the final counters, for which `success + failures == total`
    /// holds once every worker has exited normally. Per-item failures never
    /// surface here; they end up in the counters and the failure log.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` only when the feeder or a worker task panicked.
    pub async fn run(
        &self,
        items: Vec<WorkItem>,
        concurrency: usize,
        retry_budget: u32,
    ) -> QueueResult<Counters> {
        let worker_count = if concurrency == 0 {
            warn!("Concurrency of 0 requested, running a single worker");
            1
        } else {
            concurrency
        };

        let item_count = items.len();
        self.stats.add_total(item_count as u64);
        info!(
            "Starting {} workers for {} items (retry budget {})",
            worker_count, item_count, retry_budget
        );

        let (tx, rx) = mpsc::channel(item_count.max(1));
        let queue = Arc::new(Mutex::new(rx));

        let feeder = tokio::spawn(async move {
            for item in items {
                if tx.send(item).await.is_err() {
                    // every worker is gone; nothing left to feed
                    break;
                }
            }
            debug!("Feeder closed the queue");
        });

        let workers: Vec<JoinHandle<WorkerSummary>> = (0..worker_count)
            .map(|worker_id| {
                let worker = DownloadWorker::new(
                    worker_id,
                    Arc::clone(&queue),
                    Arc::clone(&self.executor),
                    Arc::clone(&self.failure_log),
                    Arc::clone(&self.stats),
                    Arc::clone(&self.progress),
                    retry_budget,
                );
                tokio::spawn(worker.run())
            })
            .collect();

        let feeder_result = feeder.await;

        let mut first_error = None;
        for (worker_id, handle) in workers.into_iter().enumerate() {
            match handle.await {
                Ok(summary) => debug!(
                    "Worker {} summary: {} processed, {} failed",
                    summary.worker_id, summary.items_processed, summary.items_failed
                ),
                Err(e) => {
                    warn!("Worker {} terminated abnormally: {}", worker_id, e);
                    first_error.get_or_insert(QueueError::WorkerPanic { worker_id });
                }
            }
        }

        if feeder_result.is_err() {
            return Err(QueueError::FeederPanic);
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        self.progress.finish(&self.stats);
        let counters = self.stats.snapshot();
        info!(
            "Pool drained: total {}, success {}, failures {}",
            counters.total, counters.success, counters.failures
        );
        Ok(counters)
    }
}
