//! HTTP fetching
//!
//! The [`Fetcher`] trait is the seam between the worker pool and the network:
//! one call performs exactly one download attempt. [`HttpFetcher`] is the
//! production implementation backed by a shared `reqwest::Client`; tests plug
//! in scripted fetchers to exercise retry and pool behavior without a server.
//!
//! - `config`: HTTP client configuration and building
//! - `download`: single-attempt streaming download to a file

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::errors::FetchResult;

pub mod config;
pub mod download;

pub use config::ClientConfig;

use download::DownloadHandler;

/// One download attempt: GET `url` and write the body to `dest_path`
///
/// Implementations must not retry; retrying is the caller's business.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, dest_path: &Path, timeout: Duration) -> FetchResult<()>;
}

/// Fetcher backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wrap an already built client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the client from configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(config.build_http_client()?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest_path: &Path, timeout: Duration) -> FetchResult<()> {
        DownloadHandler::new(&self.client)
            .download_file(url, dest_path, timeout)
            .await
            .map(|_| ())
    }
}
