//! Command handlers for Batch Fetcher CLI
//!
//! The download handler is the single setup routine: every configuration,
//! manifest and failure-log problem surfaces here as an error before any
//! worker starts. Once the pool is running, per-item failures only show up
//! in the counters and the failure log.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::app::{
    load_manifest, ClientConfig, Counters, FailureLog, HttpFetcher, RetryExecutor,
    StatsAggregator, WorkerPool,
};
use crate::cli::{DownloadArgs, ProgressLine};
use crate::config::AppConfig;
use crate::errors::{ConfigError, Result};

/// Outcome of a download run, printed with `--json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadSummary {
    pub manifest: PathBuf,
    pub destination_root: PathBuf,
    pub failure_log: PathBuf,
    pub workers: usize,
    pub retry_budget: u32,
    #[serde(flatten)]
    pub counters: Counters,
    pub elapsed_ms: u64,
}

/// Handle the download command
///
/// Resolves settings, loads the manifest, opens the failure log and runs the
/// worker pool to completion.
pub async fn handle_download(args: &DownloadArgs, config: &AppConfig) -> Result<DownloadSummary> {
    let start_time = Instant::now();

    let settings = config.resolve(&args.overrides())?;
    debug!("Resolved settings: {:?}", settings);

    let items = load_manifest(&args.from, &settings.manifest).await?;

    let failure_log = FailureLog::create(
        &settings.log_dir,
        &args.from,
        settings.manifest.delimiter.as_str(),
    )
    .await?;

    println!(
        "From: {}\nTo: {}\nDelimiter: {}\nConcurrency: {}\nTimeout: {}ms\nRetry Count: {}\nError Log: {}",
        args.from.display(),
        settings.manifest.destination_root.display(),
        settings.manifest.delimiter,
        settings.worker.worker_count,
        settings.worker.attempt_timeout.as_millis(),
        settings.worker.retry_budget,
        failure_log.path().display()
    );

    let client_config = ClientConfig::default().with_attempt_timeout(settings.worker.attempt_timeout);
    let fetcher = HttpFetcher::with_config(&client_config).map_err(ConfigError::from)?;
    let executor = RetryExecutor::new(Arc::new(fetcher), settings.worker.attempt_timeout);

    let failure_log = Arc::new(failure_log);
    let progress = ProgressLine::new(!args.no_progress);
    let pool = WorkerPool::new(
        Arc::new(executor),
        Arc::clone(&failure_log),
        Arc::new(StatsAggregator::new()),
    )
    .with_progress(Arc::new(progress));

    let counters = pool
        .run(
            items,
            settings.worker.worker_count,
            settings.worker.retry_budget,
        )
        .await?;

    println!("\nDownload completed");

    let summary = DownloadSummary {
        manifest: args.from.clone(),
        destination_root: settings.manifest.destination_root.clone(),
        failure_log: failure_log.path().to_path_buf(),
        workers: settings.worker.worker_count,
        retry_budget: settings.worker.retry_budget,
        counters,
        elapsed_ms: start_time.elapsed().as_millis() as u64,
    };
    info!(
        "Run finished in {:?}: {} succeeded, {} failed",
        start_time.elapsed(),
        counters.success,
        counters.failures
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(summary)
}
