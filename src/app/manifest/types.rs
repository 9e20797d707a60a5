//! Core types for manifest processing

use std::path::PathBuf;

use crate::constants::manifest;

/// Statistics about manifest processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestStats {
    /// Total lines read, blank ones included
    pub lines_processed: usize,
    /// Lines turned into work items
    pub valid_entries: usize,
    /// Blank lines skipped
    pub empty_lines: usize,
}

/// Configuration for manifest parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestConfig {
    /// Separator between URL and destination path
    pub delimiter: String,
    /// Root directory the destination paths are joined onto
    pub destination_root: PathBuf,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            delimiter: manifest::DEFAULT_DELIMITER.to_string(),
            destination_root: PathBuf::from(manifest::DEFAULT_DESTINATION_ROOT),
        }
    }
}
