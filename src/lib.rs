//! Batch Fetcher Library
//!
//! Downloads every URL listed in a plain-text manifest using a fixed pool of
//! concurrent workers, with per-item retries and a shared failure log.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(manifest::DEFAULT_DELIMITER, "=>>");
        assert_eq!(workers::DEFAULT_RETRY_BUDGET, 3);
        assert!(http::USER_AGENT.starts_with("batch-fetcher/"));
        assert!(workers::default_worker_count() >= 1);
    }

    #[test]
    fn test_error_types() {
        let queue_error = errors::QueueError::WorkerPanic { worker_id: 2 };
        let app_error = AppError::Queue(queue_error);

        assert_eq!(app_error.category(), "queue");
        assert_eq!(
            app_error.to_string(),
            "Worker 2 panicked or terminated unexpectedly"
        );
    }
}
