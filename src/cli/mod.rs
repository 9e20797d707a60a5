//! Command-line interface components
//!
//! This module contains CLI-specific code for the Batch Fetcher application,
//! including argument parsing, the download command, progress display and
//! interrupt handling.

pub mod args;
pub mod commands;
pub mod progress;
pub mod signals;

pub use args::{Cli, DownloadArgs, GlobalArgs};
pub use commands::{handle_download, DownloadSummary};
pub use progress::ProgressLine;
pub use signals::{shutdown_signal, Interrupt, INTERRUPT_MESSAGE};
