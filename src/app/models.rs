//! Data models for Batch Fetcher
//!
//! This module defines the values that flow through the fetch pipeline:
//! work items from the manifest, retry outcomes from the executor, the
//! shared counter snapshot, and failure records for the log.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One manifest entry to be fetched
///
/// Work items are immutable. The manifest loader produces them, the queue
/// moves each one to exactly one worker, and the worker drops it once the
/// outcome has been reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    /// Source URL
    url: String,
    /// Destination file path (already joined onto the destination root)
    dest_path: PathBuf,
}

impl WorkItem {
    /// Create a new work item
    pub fn new(url: impl Into<String>, dest_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            dest_path: dest_path.into(),
        }
    }

    /// Source URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Destination file path
    pub fn dest_path(&self) -> &Path {
        &self.dest_path
    }
}

/// Terminal result of running the retry executor on one work item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome {
    /// One of the attempts succeeded
    Success,
    /// Every attempt failed; only the last error is kept
    Failure { last_error: String },
}

impl RetryOutcome {
    /// Whether the item was fetched
    pub fn is_success(&self) -> bool {
        matches!(self, RetryOutcome::Success)
    }
}

/// Point-in-time view of the shared counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Items handed to the pool
    pub total: u64,
    /// Items fetched successfully
    pub success: u64,
    /// Items that exhausted their retry budget
    pub failures: u64,
}

impl Counters {
    /// Items with a terminal outcome
    pub fn processed(&self) -> u64 {
        self.success + self.failures
    }

    /// Whether every item has a terminal outcome
    pub fn is_complete(&self) -> bool {
        self.processed() == self.total
    }
}

/// A permanently failed item as written to the failure log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub url: String,
    pub dest_path: PathBuf,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

impl FailureRecord {
    /// Create a record stamped with the current time
    pub fn new(url: impl Into<String>, dest_path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            dest_path: dest_path.into(),
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }

    /// Render the record as one log line: `url<sep>path<sep>reason\n`
    ///
    /// Newlines inside the reason are flattened so a record always occupies
    /// exactly one line.
    pub fn to_line(&self, delimiter: &str) -> String {
        let reason = self.reason.replace(['\r', '\n'], " ");
        let mut line = String::with_capacity(
            self.url.len() + reason.len() + 2 * delimiter.len() + 64,
        );
        line.push_str(&self.url);
        line.push_str(delimiter);
        line.push_str(&self.dest_path.to_string_lossy());
        line.push_str(delimiter);
        line.push_str(&reason);
        line.push('\n');
        line
    }
}
