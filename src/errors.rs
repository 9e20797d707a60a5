//! Error types for Batch Fetcher
//!
//! Errors are split by the stage that produces them. Setup-time errors
//! (configuration, manifest, failure log) abort the run before any worker
//! starts. Fetch errors are per attempt: the retry executor absorbs them and
//! the pool turns the last one into a failure record.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from a single fetch attempt
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport error (connect, timeout, body stream)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error creating directories or writing the destination file
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server answered with anything other than 200 OK
    #[error("invalid status code {status} for URL {url}")]
    BadStatus { status: u16, url: String },

    /// URL could not be parsed
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

impl FetchError {
    /// Short label for the kind of failure, used in debug logs
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Http(e) if e.is_timeout() => "timeout",
            FetchError::Http(_) => "http",
            FetchError::Io(_) => "io",
            FetchError::BadStatus { .. } => "status",
            FetchError::InvalidUrl { .. } => "url",
        }
    }
}

/// Manifest loading and parsing errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("Manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// A non-blank line did not split into exactly two fields
    #[error("Format error in line {line}: {content}")]
    InvalidFormat { line: usize, content: String },

    /// Manifest bytes are not valid UTF-8
    #[error("Invalid UTF-8 in manifest line {line}")]
    InvalidEncoding { line: usize },

    /// I/O error reading manifest
    #[error("I/O error reading manifest: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure log setup errors
#[derive(Error, Debug)]
pub enum LogSinkError {
    /// Log directory could not be created
    #[error("Cannot create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Existing log could not be moved aside
    #[error("Cannot back up existing log {path}: {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Fresh log could not be created
    #[error("Cannot create failure log {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Worker pool errors
#[derive(Error, Debug)]
pub enum QueueError {
    /// Worker panic or unexpected termination
    #[error("Worker {worker_id} panicked or terminated unexpectedly")]
    WorkerPanic { worker_id: usize },

    /// Feeder task panicked before closing the queue
    #[error("Queue feeder terminated unexpectedly")]
    FeederPanic,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// HTTP client could not be built from the configuration
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Failure log error
    #[error(transparent)]
    LogSink(#[from] LogSinkError),

    /// Worker pool error
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// Serialization of the session summary failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Manifest(_) => "manifest",
            AppError::LogSink(_) => "log",
            AppError::Queue(_) => "queue",
            AppError::Json(_) => "json",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Manifest result type alias
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Failure log result type alias
pub type LogSinkResult<T> = std::result::Result<T, LogSinkError>;

/// Queue result type alias
pub type QueueResult<T> = std::result::Result<T, QueueError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
