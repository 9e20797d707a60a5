//! Concurrent download workers
//!
//! This module runs a batch of work items through a fixed number of workers.
//! A feeder task loads every item into a bounded queue and closes it; workers
//! drain the queue, fetch each item through the retry executor and report the
//! outcome to the shared counters and failure log.
//!
//! # Module Organization
//!
//! - [`config`] - Worker pool configuration with validation
//! - [`types`] - Worker status and per-worker summaries
//! - [`retry`] - Immediate retry around a single fetcher
//! - [`core`] - Individual worker loop
//! - [`pool`] - Feeder, worker startup and completion barrier
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use batch_fetcher::app::client::{ClientConfig, HttpFetcher};
//! use batch_fetcher::app::failure_log::FailureLog;
//! use batch_fetcher::app::models::WorkItem;
//! use batch_fetcher::app::stats::StatsAggregator;
//! use batch_fetcher::app::worker::{RetryExecutor, WorkerPool};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Arc::new(HttpFetcher::with_config(&ClientConfig::default())?);
//! let executor = Arc::new(RetryExecutor::new(fetcher, Duration::from_millis(1000)));
//! let log = Arc::new(FailureLog::create(Path::new("logs"), Path::new("list.txt"), "=>>").await?);
//! let pool = WorkerPool::new(executor, log, Arc::new(StatsAggregator::new()));
//!
//! let items = vec![WorkItem::new("http://example.com/a.png", "downloads/a.png")];
//! let counters = pool.run(items, 8, 3).await?;
//! println!("{} of {} fetched", counters.success, counters.total);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod pool;
pub mod retry;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::WorkerConfig;
pub use core::{DownloadWorker, SharedQueue};
pub use pool::WorkerPool;
pub use retry::RetryExecutor;
pub use types::{WorkerStatus, WorkerSummary};
