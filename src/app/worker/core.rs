//! Core download worker implementation
//!
//! A worker pulls items off the shared queue until the queue is closed and
//! drained. Each item goes through the retry executor, and the outcome is
//! reported exactly once: failures to the failure log and the failure
//! counter, successes to the success counter. Progress is redrawn after
//! every item.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, trace};

use super::retry::RetryExecutor;
use super::types::{WorkerStatus, WorkerSummary};
use crate::app::failure_log::FailureLog;
use crate::app::models::{RetryOutcome, WorkItem};
use crate::app::stats::{ProgressSink, StatsAggregator};

/// Receiving half of the work queue, shared by every worker
pub type SharedQueue = Arc<Mutex<mpsc::Receiver<WorkItem>>>;

/// Individual download worker
pub struct DownloadWorker {
    /// Worker identifier, unique within one pool run
    id: usize,
    /// Shared work queue
    queue: SharedQueue,
    /// Shared retry executor
    executor: Arc<RetryExecutor>,
    /// Shared failure log
    failure_log: Arc<FailureLog>,
    /// Shared counters
    stats: Arc<StatsAggregator>,
    /// Progress line
    progress: Arc<dyn ProgressSink>,
    /// Retries per item after the first attempt
    retry_budget: u32,
    /// Current phase
    status: WorkerStatus,
    summary: WorkerSummary,
}

impl std::fmt::Debug for DownloadWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadWorker")
            .field("id", &self.id)
            .field("retry_budget", &self.retry_budget)
            .field("status", &self.status)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

impl DownloadWorker {
    /// Create a new download worker
    pub fn new(
        id: usize,
        queue: SharedQueue,
        executor: Arc<RetryExecutor>,
        failure_log: Arc<FailureLog>,
        stats: Arc<StatsAggregator>,
        progress: Arc<dyn ProgressSink>,
        retry_budget: u32,
    ) -> Self {
        Self {
            id,
            queue,
            executor,
            failure_log,
            stats,
            progress,
            retry_budget,
            status: WorkerStatus::Idle,
            summary: WorkerSummary {
                worker_id: id,
                ..Default::default()
            },
        }
    }

    /// Current phase of the worker
    pub fn status(&self) -> WorkerStatus {
        self.status
    }

    /// Run the worker loop until the queue is closed and empty
    pub async fn run(mut self) -> WorkerSummary {
        debug!("Worker {} starting", self.id);

        while let Some(item) = self.next_item().await {
            self.status = WorkerStatus::Executing;
            let outcome = self.executor.execute(&item, self.retry_budget).await;

            self.status = WorkerStatus::Reporting;
            self.report(&item, outcome).await;

            self.status = WorkerStatus::Idle;
        }

        self.status = WorkerStatus::Shutdown;
        debug!(
            "Worker {} finished: {} processed, {} failed",
            self.id, self.summary.items_processed, self.summary.items_failed
        );
        self.summary
    }

    /// Take the next item, waiting while the queue is open but empty
    ///
    /// The lock is held across the wait so exactly one idle worker is parked
    /// on the channel at a time; the rest queue up on the mutex.
    async fn next_item(&mut self) -> Option<WorkItem> {
        self.status = WorkerStatus::Dequeuing;
        let item = self.queue.lock().await.recv().await;
        if let Some(item) = &item {
            trace!("Worker {} took {}", self.id, item.url());
        }
        item
    }

    async fn report(&mut self, item: &WorkItem, outcome: RetryOutcome) {
        self.summary.items_processed += 1;

        match outcome {
            RetryOutcome::Success => {
                self.stats.record_success();
            }
            RetryOutcome::Failure { last_error } => {
                self.summary.items_failed += 1;
                if let Err(e) = self
                    .failure_log
                    .record(item.url(), item.dest_path(), &last_error)
                    .await
                {
                    error!(
                        "Worker {} could not write failure record for {}: {}",
                        self.id,
                        item.url(),
                        e
                    );
                }
                self.stats.record_failure();
            }
        }

        self.progress.render(&self.stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::stats::NoProgress;
    use crate::app::worker::tests::ScriptedFetcher;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn worker_fixture(
        fetcher: Arc<ScriptedFetcher>,
        temp_dir: &TempDir,
    ) -> (mpsc::Sender<WorkItem>, Arc<FailureLog>, Arc<StatsAggregator>, DownloadWorker) {
        let (tx, rx) = mpsc::channel(16);
        let queue = Arc::new(Mutex::new(rx));
        let log = Arc::new(
            FailureLog::open_at(temp_dir.path().join("worker_error.log"), "=>>")
                .await
                .unwrap(),
        );
        let stats = Arc::new(StatsAggregator::new());
        let executor = Arc::new(RetryExecutor::new(fetcher, Duration::from_millis(10)));
        let worker = DownloadWorker::new(
            7,
            queue,
            executor,
            Arc::clone(&log),
            Arc::clone(&stats),
            Arc::new(NoProgress),
            1,
        );
        (tx, log, stats, worker)
    }

    #[tokio::test]
    async fn test_worker_exits_on_closed_empty_queue() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::failing_times(0));
        let (tx, _log, stats, worker) = worker_fixture(fetcher.clone(), &temp_dir).await;
        assert_eq!(worker.status(), WorkerStatus::Idle);
        drop(tx);

        let summary = worker.run().await;

        assert_eq!(summary.worker_id, 7);
        assert_eq!(summary.items_processed, 0);
        assert_eq!(fetcher.calls(), 0);
        assert_eq!(stats.snapshot().processed(), 0);
    }

    #[tokio::test]
    async fn test_worker_reports_each_outcome_once() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Arc::new(ScriptedFetcher::failing_urls(["http://h/bad"]));
        let (tx, log, stats, worker) = worker_fixture(fetcher.clone(), &temp_dir).await;

        stats.add_total(3);
        tx.send(WorkItem::new("http://h/one", "d/one")).await.unwrap();
        tx.send(WorkItem::new("http://h/bad", "d/bad")).await.unwrap();
        tx.send(WorkItem::new("http://h/two", "d/two")).await.unwrap();
        drop(tx);

        let summary = worker.run().await;

        assert_eq!(summary.items_processed, 3);
        assert_eq!(summary.items_failed, 1);
        let counters = stats.snapshot();
        assert_eq!(counters.success, 2);
        assert_eq!(counters.failures, 1);
        assert_eq!(log.records_written(), 1);
        // two successes plus two attempts on the failing item
        assert_eq!(fetcher.calls(), 4);

        let content = tokio::fs::read_to_string(log.path()).await.unwrap();
        assert!(content.starts_with("http://h/bad=>>d/bad=>>"));
    }
}
