//! Sitemap fetching
//!
//! Any non-2xx status or transport error is reported as a `SitemapError`;
//! the expander turns that into an empty contribution.

use crate::sitemap::SitemapError;
use reqwest::Client;

/// Fetches one sitemap document as text
///
/// # Arguments
///
/// * `client` - The HTTP client (carries the per-call timeout)
/// * `url` - The sitemap URL
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(SitemapError)` - Network failure or non-success status
pub async fn fetch_sitemap(client: &Client, url: &str) -> Result<String, SitemapError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| SitemapError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SitemapError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| SitemapError::Http {
        url: url.to_string(),
        source,
    })
}
