//! Sitemap module for turning a sitemap tree into a flat URL list
//!
//! This module contains:
//! - Parsing of sitemap and sitemap-index XML documents
//! - Fetching sitemaps over HTTP
//! - Recursive expansion of sitemap indexes with depth and cycle guards

mod expander;
mod fetcher;
mod parser;

pub use expander::SitemapExpander;
pub use fetcher::fetch_sitemap;
pub use parser::{parse_sitemap, SitemapEntry};

use thiserror::Error;

/// Errors raised while fetching or parsing one sitemap document
///
/// The expander never propagates these; a sitemap that fails contributes no
/// URLs and the failure is logged.
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed sitemap XML: {0}")]
    Xml(String),
}
