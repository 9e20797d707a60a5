//! Retry executor
//!
//! Runs up to `retry_budget + 1` fetch attempts for one item, back to back,
//! stopping at the first success. Only the last error survives into the
//! outcome. The executor never touches counters or the failure log; the
//! worker that owns the item reports the outcome.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::app::client::Fetcher;
use crate::app::models::{RetryOutcome, WorkItem};

/// Fetcher wrapper with a fixed immediate-retry policy
#[derive(Clone)]
pub struct RetryExecutor {
    fetcher: Arc<dyn Fetcher>,
    attempt_timeout: Duration,
}

impl std::fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("attempt_timeout", &self.attempt_timeout)
            .finish_non_exhaustive()
    }
}

impl RetryExecutor {
    pub fn new(fetcher: Arc<dyn Fetcher>, attempt_timeout: Duration) -> Self {
        Self {
            fetcher,
            attempt_timeout,
        }
    }

    /// Per-attempt timeout handed to the fetcher
    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// Fetch `item`, retrying immediately up to `retry_budget` times
    pub async fn execute(&self, item: &WorkItem, retry_budget: u32) -> RetryOutcome {
        let max_attempts = retry_budget.saturating_add(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self
                .fetcher
                .fetch(item.url(), item.dest_path(), self.attempt_timeout)
                .await
            {
                Ok(()) => {
                    if attempt > 1 {
                        debug!("{} succeeded on attempt {}", item.url(), attempt);
                    }
                    return RetryOutcome::Success;
                }
                Err(e) => {
                    debug!(
                        "{} attempt {}/{} failed ({}): {}",
                        item.url(),
                        attempt,
                        max_attempts,
                        e.kind(),
                        e
                    );
                    last_error = e.to_string();
                }
            }
        }

        RetryOutcome::Failure { last_error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::worker::tests::ScriptedFetcher;

    fn item() -> WorkItem {
        WorkItem::new("http://example.com/a.png", "downloads/a.png")
    }

    #[tokio::test]
    async fn test_always_failing_fetch_uses_whole_budget() {
        for budget in [0u32, 1, 3, 7] {
            let fetcher = Arc::new(ScriptedFetcher::always_failing());
            let executor = RetryExecutor::new(fetcher.clone(), Duration::from_millis(10));

            let outcome = executor.execute(&item(), budget).await;

            assert!(!outcome.is_success());
            assert_eq!(fetcher.calls(), budget as usize + 1);
        }
    }

    #[tokio::test]
    async fn test_stops_at_first_success() {
        for (failures, budget) in [(0u32, 3u32), (1, 3), (3, 3), (2, 10)] {
            let fetcher = Arc::new(ScriptedFetcher::failing_times(failures));
            let executor = RetryExecutor::new(fetcher.clone(), Duration::from_millis(10));

            let outcome = executor.execute(&item(), budget).await;

            assert_eq!(outcome, RetryOutcome::Success);
            assert_eq!(fetcher.calls(), failures as usize + 1);
        }
    }

    #[tokio::test]
    async fn test_failure_keeps_only_last_error() {
        let fetcher = Arc::new(ScriptedFetcher::always_failing());
        let executor = RetryExecutor::new(fetcher.clone(), Duration::from_millis(10));

        let outcome = executor.execute(&item(), 2).await;

        match outcome {
            RetryOutcome::Failure { last_error } => {
                assert!(last_error.contains("status code 503"), "{last_error}");
                assert!(last_error.ends_with("#3"), "{last_error}");
            }
            RetryOutcome::Success => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_attempts_use_configured_timeout() {
        let fetcher = Arc::new(ScriptedFetcher::failing_times(0));
        let executor = RetryExecutor::new(fetcher.clone(), Duration::from_millis(1234));

        executor.execute(&item(), 0).await;

        assert_eq!(fetcher.last_timeout(), Some(Duration::from_millis(1234)));
        assert_eq!(executor.attempt_timeout(), Duration::from_millis(1234));
    }
}
