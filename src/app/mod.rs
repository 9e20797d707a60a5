//! Core application logic for Batch Fetcher
//!
//! This module contains the fetch pipeline: manifest loading, the HTTP
//! fetcher, the retry executor and worker pool, the shared counters and the
//! failure log.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use batch_fetcher::app::{
//!     load_manifest, FailureLog, HttpFetcher, ClientConfig, ManifestConfig, RetryExecutor,
//!     StatsAggregator, WorkerPool,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ManifestConfig::default();
//! let items = load_manifest("images.txt", &config).await?;
//!
//! let fetcher = Arc::new(HttpFetcher::with_config(&ClientConfig::default())?);
//! let executor = Arc::new(RetryExecutor::new(fetcher, Duration::from_secs(1)));
//! let log = FailureLog::create(Path::new("logs"), Path::new("images.txt"), &config.delimiter).await?;
//!
//! let pool = WorkerPool::new(executor, Arc::new(log), Arc::new(StatsAggregator::new()));
//! let counters = pool.run(items, 8, 3).await?;
//! assert_eq!(counters.success + counters.failures, counters.total);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod failure_log;
pub mod manifest;
pub mod models;
pub mod stats;
pub mod worker;

// Re-export main public API
pub use client::{ClientConfig, Fetcher, HttpFetcher};
pub use failure_log::FailureLog;
pub use manifest::{load_manifest, parse_manifest, ManifestConfig, ManifestStats};
pub use models::{Counters, FailureRecord, RetryOutcome, WorkItem};
pub use stats::{NoProgress, ProgressSink, StatsAggregator};
pub use worker::{RetryExecutor, WorkerConfig, WorkerPool};
