//! Shared HTTP client construction

use crate::config::IndexerSettings;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for sitemap fetches, API calls and notifications
///
/// Every request gets the configured timeout; connection setup is capped
/// separately so an unreachable host fails fast.
///
/// # Example
///
/// ```no_run
/// use link_indexer::config::load_config;
/// use link_indexer::http::build_http_client;
/// use std::path::Path;
///
/// let config = load_config(Path::new("indexer.toml")).unwrap();
/// let client = build_http_client(&config.indexer).unwrap();
/// ```
pub fn build_http_client(settings: &IndexerSettings) -> Result<Client, reqwest::Error> {
    let timeout = settings.request_timeout();

    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}
