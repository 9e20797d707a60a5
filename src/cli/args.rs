//! Command-line argument parsing for Batch Fetcher
//!
//! This module defines the CLI structure using clap derive macros. Download
//! flags are optional where the configuration file or a built-in default can
//! supply the value; only the manifest path is required.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::DownloadOverrides;

/// Batch Fetcher - download a list of URLs concurrently
#[derive(Parser, Debug)]
#[command(
    name = "batch_fetcher",
    version,
    about = "Download every URL listed in a manifest file",
    long_about = "Reads `url<delimiter>path` lines from a manifest and downloads each URL to its path
using a fixed pool of concurrent workers. Items that still fail after their retries are written
to a timestamped error log."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Download options
    #[command(flatten)]
    pub download: DownloadArgs,
}

/// Global arguments
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the download run
#[derive(Args, Debug, Clone, Default)]
pub struct DownloadArgs {
    /// Manifest file with one `url<delimiter>path` entry per line
    #[arg(long, value_name = "FILE")]
    pub from: PathBuf,

    /// Delimiter between URL and path [default: "=>>"]
    #[arg(long, value_name = "SEP")]
    pub split: Option<String>,

    /// Root directory for downloaded files [default: downloads]
    #[arg(long, value_name = "DIR")]
    pub to: Option<PathBuf>,

    /// Retries per URL after the first attempt [default: 3]
    #[arg(long, value_name = "COUNT")]
    pub retry: Option<u32>,

    /// Number of concurrent workers [default: CPU count]
    #[arg(long, value_name = "WORKERS")]
    pub num: Option<usize>,

    /// Per-attempt timeout in milliseconds [default: 1000]
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Directory for failure logs [default: logs]
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Do not draw the live progress line
    #[arg(long)]
    pub no_progress: bool,

    /// Print a JSON summary of the run on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Logging level requested by flags, if any
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl DownloadArgs {
    /// Flags that override configuration file values
    pub fn overrides(&self) -> DownloadOverrides {
        DownloadOverrides {
            delimiter: self.split.clone(),
            destination_root: self.to.clone(),
            retry_budget: self.retry,
            worker_count: self.num,
            timeout_ms: self.timeout,
            log_dir: self.log_dir.clone(),
        }
    }
}
