//! Manifest loading
//!
//! Turns a `url<sep>path` text file into the list of work items handed to the
//! worker pool. Validation is strict and happens before any worker starts.
//!
//! # Examples
//!
//! ```rust,no_run
//! use batch_fetcher::app::manifest::{load_manifest, ManifestConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let items = load_manifest("images.txt", &ManifestConfig::default()).await?;
//! println!("{} items to fetch", items.len());
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod types;

pub use parser::{load_manifest, parse_manifest, parse_manifest_line};
pub use types::{ManifestConfig, ManifestStats};
