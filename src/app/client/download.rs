//! Streaming file download
//!
//! One call performs exactly one GET and streams the body straight into the
//! destination file. There is no retry, no temp file and no cleanup here: a
//! failed attempt may leave an empty or partial file behind, and the next
//! attempt truncates it.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::errors::{FetchError, FetchResult};

/// File download operations handler
pub struct DownloadHandler<'a> {
    client: &'a Client,
}

impl<'a> DownloadHandler<'a> {
    /// Creates a new DownloadHandler borrowing the shared client
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Downloads `url` into `destination`
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to download from
    /// * `destination` - The file to create or truncate
    /// * `timeout` - Bound on the whole request, connect through last body byte
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if:
    /// - The parent directory cannot be created (`Io`)
    /// - The URL does not parse (`InvalidUrl`)
    /// - The request fails or times out (`Http`)
    /// - The status is anything but 200 (`BadStatus`)
    /// - The file cannot be created or written (`Io`)
    pub async fn download_file(
        &self,
        url: &str,
        destination: &Path,
        timeout: Duration,
    ) -> FetchResult<u64> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let parsed_url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            error: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed_url)
            .timeout(timeout)
            .send()
            .await?;

        // Strict equality: 204, 206 and friends are failures too
        if response.status() != StatusCode::OK {
            return Err(FetchError::BadStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let mut file = File::create(destination).await?;
        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!("Wrote {} bytes to {}", written, destination.display());
        Ok(written)
    }
}
