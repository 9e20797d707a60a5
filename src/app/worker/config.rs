//! Worker pool configuration
//!
//! The pool has three knobs: how many workers run, how many retries each
//! item gets after its first attempt, and how long a single attempt may take.

use std::time::Duration;

use crate::constants::workers;
use crate::errors::{ConfigError, ConfigResult};

/// Configuration for the download worker pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Number of concurrent workers to spawn
    pub worker_count: usize,
    /// Additional attempts after the first, per item
    pub retry_budget: u32,
    /// Bound on a single attempt (connect through last body byte)
    pub attempt_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_count: workers::default_worker_count(),
            retry_budget: workers::DEFAULT_RETRY_BUDGET,
            attempt_timeout: workers::DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl WorkerConfig {
    /// Validate configuration values and return errors for invalid settings
    pub fn validate(&self) -> ConfigResult<()> {
        if self.worker_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "worker_count".to_string(),
                value: self.worker_count.to_string(),
                reason: "Concurrency must be greater than 0".to_string(),
            });
        }

        if self.attempt_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "timeout".to_string(),
                value: format!("{:?}", self.attempt_timeout),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
