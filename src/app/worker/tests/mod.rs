//! Test doubles for the worker module
//!
//! The scripted fetcher stands in for the network so retry and pool
//! behavior can be checked without a server.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::client::Fetcher;
use crate::app::stats::{ProgressSink, StatsAggregator};
use crate::errors::{FetchError, FetchResult};

enum Script {
    /// First `n` calls fail, every later call succeeds
    FailFirst(usize),
    /// These URLs always fail, everything else succeeds
    FailUrls(HashSet<String>),
    /// Calls for this URL panic
    PanicOn(String),
}

/// Fetcher that succeeds or fails according to a script
pub struct ScriptedFetcher {
    script: Script,
    calls: AtomicUsize,
    fetched: Mutex<Vec<String>>,
    last_timeout: Mutex<Option<Duration>>,
}

impl ScriptedFetcher {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            fetched: Mutex::new(Vec::new()),
            last_timeout: Mutex::new(None),
        }
    }

    pub fn failing_times(failures: u32) -> Self {
        Self::with_script(Script::FailFirst(failures as usize))
    }

    pub fn always_failing() -> Self {
        Self::with_script(Script::FailFirst(usize::MAX))
    }

    pub fn failing_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_script(Script::FailUrls(urls.into_iter().map(Into::into).collect()))
    }

    pub fn panicking_on(url: &str) -> Self {
        Self::with_script(Script::PanicOn(url.to_string()))
    }

    /// Number of fetch attempts so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// URLs of successful fetches, in completion order
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn last_timeout(&self) -> Option<Duration> {
        *self.last_timeout.lock().unwrap()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str, _dest_path: &Path, timeout: Duration) -> FetchResult<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_timeout.lock().unwrap() = Some(timeout);
        tokio::task::yield_now().await;

        let fail = match &self.script {
            Script::FailFirst(n) => call <= *n,
            Script::FailUrls(urls) => urls.contains(url),
            Script::PanicOn(target) => {
                if target == url {
                    panic!("scripted panic for {url}");
                }
                false
            }
        };

        if fail {
            return Err(FetchError::BadStatus {
                status: 503,
                url: format!("{url}#{call}"),
            });
        }

        self.fetched.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Progress sink that remembers what it was asked to draw
#[derive(Default)]
pub struct RecordingProgress {
    renders: AtomicUsize,
    finishes: AtomicUsize,
    final_line: Mutex<String>,
}

impl RecordingProgress {
    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    pub fn finishes(&self) -> usize {
        self.finishes.load(Ordering::SeqCst)
    }

    /// Line drawn by `finish`
    pub fn final_line(&self) -> String {
        self.final_line.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn render(&self, _stats: &StatsAggregator) {
        self.renders.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self, stats: &StatsAggregator) {
        self.finishes.fetch_add(1, Ordering::SeqCst);
        *self.final_line.lock().unwrap() = stats.render_line();
    }
}
