//! HTTP client configuration and building logic
//!
//! One `reqwest::Client` is built per run and shared by every worker so that
//! connections are pooled. The per-attempt timeout is applied on each request
//! rather than on the client.

use std::time::Duration;

use reqwest::Client;

use crate::constants::http;

/// Configuration for the shared HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent sent with every request
    pub user_agent: String,
    /// Upper bound for establishing a connection
    pub connect_timeout: Duration,
    /// Maximum number of idle connections kept per host
    pub pool_max_per_host: usize,
    /// TCP nodelay (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: http::USER_AGENT.to_string(),
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            tcp_nodelay: true,
        }
    }
}

impl ClientConfig {
    /// Cap the connect timeout so it never exceeds the per-attempt timeout
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.connect_timeout = self.connect_timeout.min(attempt_timeout);
        self
    }

    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> Result<Client, reqwest::Error> {
        Client::builder()
            .user_agent(self.user_agent.as_str())
            .connect_timeout(self.connect_timeout)
            .tcp_nodelay(self.tcp_nodelay)
            .pool_max_idle_per_host(self.pool_max_per_host)
            .build()
    }
}
