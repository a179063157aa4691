//! Shared HTTP client construction
//!
//! Provider adapters build their `reqwest` client here so connection pooling,
//! keepalive and timeouts are configured the same way everywhere.

use crate::utils::error::Result;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client pool
#[derive(Debug, Clone)]
struct HttpClientPoolConfig {
    /// Maximum idle connections per host
    pool_max_idle_per_host: usize,
    /// Idle connection timeout
    pool_idle_timeout: Duration,
    /// Connection timeout
    connect_timeout: Duration,
    /// TCP keepalive interval
    tcp_keepalive: Duration,
    /// User agent string
    user_agent: &'static str,
}

impl Default for HttpClientPoolConfig {
    fn default() -> Self {
        Self {
            // One run fans out at most a few hundred requests to one host
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            connect_timeout: Duration::from_secs(10),
            tcp_keepalive: Duration::from_secs(60),
            user_agent: concat!("customer-onboarding/", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create an HTTP client with the given overall request timeout
pub fn create_http_client(timeout: Duration) -> Result<Client> {
    create_http_client_with(timeout, &HttpClientPoolConfig::default())
}

fn create_http_client_with(timeout: Duration, config: &HttpClientPoolConfig) -> Result<Client> {
    debug!(timeout_secs = timeout.as_secs(), "Creating HTTP client");

    let client = ClientBuilder::new()
        // Connection pool settings
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout)
        // Request timeouts
        .timeout(timeout)
        .connect_timeout(config.connect_timeout)
        // TCP optimizations
        .tcp_keepalive(config.tcp_keepalive)
        .tcp_nodelay(true)
        .user_agent(config.user_agent)
        .build()?;

    Ok(client)
}
