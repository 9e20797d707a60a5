//! Application constants for Batch Fetcher
//!
//! Defaults are grouped by the component that consumes them.

use std::time::Duration;

/// Manifest parsing defaults
pub mod manifest {
    /// Default field delimiter between URL and destination path
    pub const DEFAULT_DELIMITER: &str = "=>>";

    /// Default root directory for downloaded files
    pub const DEFAULT_DESTINATION_ROOT: &str = "downloads";
}

/// Worker pool defaults
pub mod workers {
    use super::Duration;

    /// Default number of retries after the first attempt
    pub const DEFAULT_RETRY_BUDGET: u32 = 3;

    /// Default per-attempt timeout
    pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(1000);

    /// Fallback worker count when the CPU count cannot be determined
    pub const FALLBACK_WORKER_COUNT: usize = 4;

    /// Default worker count: one per available CPU
    pub fn default_worker_count() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(FALLBACK_WORKER_COUNT)
    }
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("batch-fetcher/", env!("CARGO_PKG_VERSION"));

    /// Connection establishment timeout upper bound
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Maximum idle connections kept per host
    pub const POOL_MAX_PER_HOST: usize = 32;
}

/// Failure log naming
pub mod logs {
    /// Default directory for failure logs
    pub const DEFAULT_LOG_DIR: &str = "logs";

    /// Timestamp format embedded in the log file name
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

    /// File name suffix of failure logs
    pub const LOG_SUFFIX: &str = "error.log";

    /// Suffix appended to a log moved aside by a newer run
    pub const BACKUP_SUFFIX: &str = "_backup";
}

/// Configuration file discovery
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "batch-fetcher.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "batch-fetcher";

    /// File name inside the user config directory
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}
