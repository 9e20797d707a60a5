//! Manifest parsing
//!
//! A manifest is plain text with one `url<sep>path` entry per line. Parsing
//! is all-or-nothing: the first malformed line aborts the whole load so that
//! no download starts from a half-understood manifest.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use super::types::{ManifestConfig, ManifestStats};
use crate::app::models::WorkItem;
use crate::errors::{ManifestError, ManifestResult};

/// Split one trimmed, non-blank line into its URL and path fields
///
/// The line must contain the delimiter exactly once; both fields are
/// whitespace-trimmed.
pub fn parse_manifest_line<'a>(line: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let mut fields = line.split(delimiter);
    let url = fields.next()?;
    let path = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some((url.trim(), path.trim()))
}

/// Join a manifest path onto the destination root
///
/// Root and prefix components are dropped, so an absolute manifest path
/// still lands under `root`.
pub fn resolve_destination(root: &Path, path: &str) -> PathBuf {
    let relative: PathBuf = Path::new(path)
        .components()
        .filter(|c| {
            matches!(
                c,
                Component::Normal(_) | Component::ParentDir | Component::CurDir
            )
        })
        .collect();
    root.join(relative)
}

/// Parse manifest content into work items
///
/// Carriage returns are stripped and blank lines skipped. Line numbers in
/// errors are 1-based and count blank lines.
pub fn parse_manifest(
    content: &str,
    config: &ManifestConfig,
) -> ManifestResult<(Vec<WorkItem>, ManifestStats)> {
    let mut stats = ManifestStats::default();
    let mut items = Vec::new();

    for (index, raw) in content.split('\n').enumerate() {
        stats.lines_processed += 1;
        let line = raw.replace('\r', "");
        let line = line.trim();
        if line.is_empty() {
            stats.empty_lines += 1;
            continue;
        }

        let (url, path) = parse_manifest_line(line, &config.delimiter).ok_or_else(|| {
            ManifestError::InvalidFormat {
                line: index + 1,
                content: line.to_string(),
            }
        })?;

        items.push(WorkItem::new(
            url,
            resolve_destination(&config.destination_root, path),
        ));
        stats.valid_entries += 1;
    }

    debug!(
        "Parsed {} entries from {} lines ({} blank)",
        stats.valid_entries, stats.lines_processed, stats.empty_lines
    );
    Ok((items, stats))
}

/// Read and parse a manifest file
///
/// # Errors
///
/// Returns `ManifestError::NotFound` if the file does not exist,
/// `ManifestError::Io` if it cannot be read, `ManifestError::InvalidEncoding`
/// if it is not valid UTF-8 and `ManifestError::InvalidFormat` for the first
/// malformed line.
pub async fn load_manifest<P: AsRef<Path>>(
    manifest_path: P,
    config: &ManifestConfig,
) -> ManifestResult<Vec<WorkItem>> {
    let manifest_path = manifest_path.as_ref();
    if !manifest_path.exists() {
        return Err(ManifestError::NotFound {
            path: manifest_path.to_path_buf(),
        });
    }

    let bytes = tokio::fs::read(manifest_path).await?;
    let content = String::from_utf8(bytes).map_err(|e| {
        let line = 1 + e.as_bytes()[..e.utf8_error().valid_up_to()]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        ManifestError::InvalidEncoding { line }
    })?;
    let (items, stats) = parse_manifest(&content, config)?;

    info!(
        "Loaded {} work items from {}",
        stats.valid_entries,
        manifest_path.display()
    );
    Ok(items)
}
