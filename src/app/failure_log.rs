//! Failure log for permanently failed items
//!
//! The log is opened once before any worker starts and shared by all of them.
//! Each record is rendered to a complete line first and then written with a
//! single call while the file lock is held, so concurrent workers never
//! interleave partial lines.
//!
//! Log files live at `<log_dir>/<manifest stem>_<YYYYmmddHHMMSS>_error.log`.
//! If that file already exists it is renamed to `<name>_backup` first,
//! replacing any older backup.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::app::models::FailureRecord;
use crate::constants::logs;
use crate::errors::{LogSinkError, LogSinkResult};

/// Append-only sink for failure records
#[derive(Debug)]
pub struct FailureLog {
    path: PathBuf,
    delimiter: String,
    file: Mutex<File>,
    records: AtomicU64,
}

impl FailureLog {
    /// Derive the log file path for a manifest and a run start time
    pub fn log_path_for(log_dir: &Path, manifest_path: &Path, started: DateTime<Local>) -> PathBuf {
        let stem = manifest_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = format!(
            "{}_{}_{}",
            stem,
            started.format(logs::TIMESTAMP_FORMAT),
            logs::LOG_SUFFIX
        );
        log_dir.join(name)
    }

    /// Create the log for `manifest_path` under `log_dir`, stamped with the current time
    pub async fn create(
        log_dir: &Path,
        manifest_path: &Path,
        delimiter: impl Into<String>,
    ) -> LogSinkResult<Self> {
        let path = Self::log_path_for(log_dir, manifest_path, Local::now());
        Self::open_at(path, delimiter).await
    }

    /// Create a fresh log at `path`, moving any existing file aside
    ///
    /// # Errors
    ///
    /// Any failure here is fatal to the run: without a log, failures would be
    /// silently lost.
    pub async fn open_at(path: PathBuf, delimiter: impl Into<String>) -> LogSinkResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| LogSinkError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            let backup = backup_path(&path);
            warn!(
                "Failure log {} already exists, moving it to {}",
                path.display(),
                backup.display()
            );
            tokio::fs::rename(&path, &backup)
                .await
                .map_err(|source| LogSinkError::Backup {
                    path: path.clone(),
                    source,
                })?;
        }

        let file = File::create(&path)
            .await
            .map_err(|source| LogSinkError::Create {
                path: path.clone(),
                source,
            })?;

        info!("Failure log: {}", path.display());
        Ok(Self {
            path,
            delimiter: delimiter.into(),
            file: Mutex::new(file),
            records: AtomicU64::new(0),
        })
    }

    /// Append one failure as `url<sep>path<sep>reason`
    pub async fn record(
        &self,
        url: &str,
        dest_path: &Path,
        reason: &str,
    ) -> std::io::Result<()> {
        self.record_entry(&FailureRecord::new(url, dest_path, reason))
            .await
    }

    /// Append a prepared record
    pub async fn record_entry(&self, record: &FailureRecord) -> std::io::Result<()> {
        let line = record.to_line(&self.delimiter);
        {
            let mut file = self.file.lock().await;
            file.write_all(line.as_bytes()).await?;
            file.flush().await?;
        }
        self.records.fetch_add(1, Ordering::SeqCst);
        debug!("Recorded failure for {} at {}", record.url, record.timestamp);
        Ok(())
    }

    /// Location of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records written so far
    pub fn records_written(&self) -> u64 {
        self.records.load(Ordering::SeqCst)
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(logs::BACKUP_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_log_path_derivation() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = FailureLog::log_path_for(
            Path::new("logs"),
            Path::new("/data/lists/images.txt"),
            started,
        );
        assert_eq!(path, PathBuf::from("logs/images_20240309140507_error.log"));
    }

    #[tokio::test]
    async fn test_open_creates_directory_and_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/logs/run_error.log");

        let log = FailureLog::open_at(path.clone(), "=>>").await.unwrap();

        assert_eq!(log.path(), path.as_path());
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "");
        assert_eq!(log.records_written(), 0);
    }

    #[tokio::test]
    async fn test_existing_log_is_backed_up() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run_error.log");
        let backup = temp_dir.path().join("run_error.log_backup");
        tokio::fs::write(&backup, "oldest").await.unwrap();
        tokio::fs::write(&path, "previous run").await.unwrap();

        let _log = FailureLog::open_at(path.clone(), "=>>").await.unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "");
        assert_eq!(
            tokio::fs::read_to_string(&backup).await.unwrap(),
            "previous run"
        );
    }

    #[tokio::test]
    async fn test_open_fails_when_directory_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("logs");
        tokio::fs::write(&blocker, "not a directory").await.unwrap();

        let result = FailureLog::open_at(blocker.join("run_error.log"), "=>>").await;
        assert!(matches!(result, Err(LogSinkError::CreateDir { .. })));
    }

    #[tokio::test]
    async fn test_record_line_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run_error.log");
        let log = FailureLog::open_at(path.clone(), "=>>").await.unwrap();

        log.record(
            "http://example.com/a.png",
            Path::new("downloads/a.png"),
            "invalid status code 500 for URL http://example.com/a.png",
        )
        .await
        .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            content,
            "http://example.com/a.png=>>downloads/a.png=>>invalid status code 500 for URL http://example.com/a.png\n"
        );
        assert_eq!(log.records_written(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_records_do_not_interleave() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run_error.log");
        let log = Arc::new(FailureLog::open_at(path.clone(), "|").await.unwrap());

        let mut handles = Vec::new();
        for task in 0..16 {
            let log = Arc::clone(&log);
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    let url = format!("http://h/{task}/{i}");
                    let dest = PathBuf::from(format!("out/{task}/{i}"));
                    log.record(&url, &dest, &"x".repeat(200)).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 800);
        assert_eq!(log.records_written(), 800);

        let mut urls = HashSet::new();
        for line in lines {
            let fields: Vec<&str> = line.split('|').collect();
            assert_eq!(fields.len(), 3, "malformed line: {line}");
            assert_eq!(fields[2].len(), 200);
            assert!(urls.insert(fields[0].to_string()));
        }
    }
}
