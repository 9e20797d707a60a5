//! Configuration management for Batch Fetcher
//!
//! Settings come from three layers: built-in defaults, an optional TOML file
//! and command-line flags, each overriding the one before. The merged result
//! is validated once, before the manifest is read or any worker starts.
//!
//! ```toml
//! [download]
//! delimiter = "=>>"
//! destination_root = "downloads"
//! retry_budget = 3
//! worker_count = 16
//! timeout = "1500ms"
//! log_dir = "logs"
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ManifestConfig, WorkerConfig};
use crate::constants::{config as config_constants, logs, manifest, workers};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Download pipeline settings
    pub download: DownloadConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly download configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfigToml {
    /// Separator between URL and path, in the manifest and the failure log
    pub delimiter: String,
    /// Root directory for destination paths
    pub destination_root: PathBuf,
    /// Retries per item after the first attempt
    pub retry_budget: u32,
    /// Number of concurrent workers (unset = CPU count)
    pub worker_count: Option<usize>,
    /// Per-attempt timeout, e.g. "1000ms" or "2s"
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Directory for failure logs
    pub log_dir: PathBuf,
}

impl Default for DownloadConfigToml {
    fn default() -> Self {
        Self {
            delimiter: manifest::DEFAULT_DELIMITER.to_string(),
            destination_root: PathBuf::from(manifest::DEFAULT_DESTINATION_ROOT),
            retry_budget: workers::DEFAULT_RETRY_BUDGET,
            worker_count: None,
            timeout: workers::DEFAULT_ATTEMPT_TIMEOUT,
            log_dir: PathBuf::from(logs::DEFAULT_LOG_DIR),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parse the configured level, falling back to WARN for unknown names
    pub fn tracing_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::WARN)
    }
}

/// Values supplied on the command line; `None` keeps the file or default value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOverrides {
    pub delimiter: Option<String>,
    pub destination_root: Option<PathBuf>,
    pub retry_budget: Option<u32>,
    pub worker_count: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

/// Fully resolved and validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    pub manifest: ManifestConfig,
    pub worker: WorkerConfig,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, then standard locations)
    ///
    /// CLI overrides are applied afterwards by [`AppConfig::resolve`].
    pub async fn load(config_file_override: Option<&Path>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                Some(path.to_path_buf())
            }
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        Self::search_paths().into_iter().find(|path| {
            let found = path.is_file();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// Standard config locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(config_constants::LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(
                config_dir
                    .join(config_constants::CONFIG_DIR_NAME)
                    .join(config_constants::CONFIG_FILE_NAME),
            );
        }
        paths
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command-line overrides and validate the result
    pub fn resolve(&self, overrides: &DownloadOverrides) -> ConfigResult<DownloadSettings> {
        let file = &self.download;

        let delimiter = overrides
            .delimiter
            .clone()
            .unwrap_or_else(|| file.delimiter.clone());
        if delimiter.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "delimiter".to_string(),
                value: String::new(),
                reason: "Delimiter must not be empty".to_string(),
            });
        }

        let timeout = overrides
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(file.timeout);

        let worker = WorkerConfig {
            worker_count: overrides
                .worker_count
                .or(file.worker_count)
                .unwrap_or_else(workers::default_worker_count),
            retry_budget: overrides.retry_budget.unwrap_or(file.retry_budget),
            attempt_timeout: timeout,
        };
        worker.validate()?;

        Ok(DownloadSettings {
            manifest: ManifestConfig {
                delimiter,
                destination_root: overrides
                    .destination_root
                    .clone()
                    .unwrap_or_else(|| file.destination_root.clone()),
            },
            worker,
            log_dir: overrides
                .log_dir
                .clone()
                .unwrap_or_else(|| file.log_dir.clone()),
        })
    }
}
