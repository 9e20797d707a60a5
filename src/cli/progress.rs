//! Live progress line for download runs
//!
//! A single non-scrolling line on stderr showing
//! `total: N, success: N, failures: N, time: ...`, redrawn by workers after
//! every completed item. indicatif rate-limits the actual terminal writes,
//! so per-item updates stay cheap even with many workers.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::app::stats::{ProgressSink, StatsAggregator};

/// indicatif-backed [`ProgressSink`]
#[derive(Clone)]
pub struct ProgressLine {
    bar: ProgressBar,
}

impl std::fmt::Debug for ProgressLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressLine")
            .field("visible", &self.is_visible())
            .finish()
    }
}

impl ProgressLine {
    /// Create the progress line
    ///
    /// Drawing is disabled when `enabled` is false or stderr is not a
    /// terminal, in which case every update is a no-op.
    pub fn new(enabled: bool) -> Self {
        let is_terminal = atty::is(atty::Stream::Stderr);
        let target = if enabled && is_terminal {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };

        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(
            ProgressStyle::with_template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self { bar }
    }

    /// A progress line that never draws
    pub fn hidden() -> Self {
        Self::new(false)
    }

    /// Whether updates reach the terminal
    pub fn is_visible(&self) -> bool {
        !self.bar.is_hidden()
    }

    /// Text of the last rendered update
    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl ProgressSink for ProgressLine {
    fn render(&self, stats: &StatsAggregator) {
        self.bar.set_message(stats.render_line());
    }

    fn finish(&self, stats: &StatsAggregator) {
        // keep the final counters on screen
        self.bar.finish_with_message(stats.render_line());
    }
}
