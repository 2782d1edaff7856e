//! Recursive sitemap expansion
//!
//! Walks a sitemap-index tree depth first and flattens it into the leaf URLs
//! in document order. Duplicates across child sitemaps are kept; the pending
//! set merge removes them.

use crate::sitemap::{fetch_sitemap, parse_sitemap, SitemapEntry};
use crate::url::parse_absolute_url;
use reqwest::Client;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

type ExpandFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Expands sitemap trees into flat URL lists
#[derive(Debug, Clone)]
pub struct SitemapExpander {
    client: Client,
    max_depth: u32,
}

/// Per-expansion bookkeeping
#[derive(Default)]
struct Walk {
    /// Sitemaps on the path from the root to the one being expanded
    ancestors: HashSet<String>,
    links: Vec<String>,
    failed_sitemaps: usize,
}

impl SitemapExpander {
    /// Creates an expander
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for every sitemap fetch
    /// * `max_depth` - How many levels of nested sitemap indexes to follow
    pub fn new(client: Client, max_depth: u32) -> Self {
        Self { client, max_depth }
    }

    /// Expands the sitemap at `root` into its leaf URLs
    ///
    /// Never fails: a sitemap that cannot be fetched or parsed contributes
    /// nothing and is logged. A sitemap that appears among its own ancestors and
    /// sitemaps nested deeper than `max_depth` are skipped.
    pub async fn expand(&self, root: &str) -> Vec<String> {
        let mut walk = Walk::default();
        self.expand_into(root.to_string(), 0, &mut walk).await;

        if walk.failed_sitemaps > 0 {
            tracing::warn!(
                "Expanded {} into {} links ({} sitemaps failed)",
                root,
                walk.links.len(),
                walk.failed_sitemaps
            );
        } else {
            tracing::info!("Expanded {} into {} links", root, walk.links.len());
        }

        walk.links
    }

    fn expand_into<'a>(&'a self, url: String, depth: u32, walk: &'a mut Walk) -> ExpandFuture<'a> {
        Box::pin(async move {
            if depth > self.max_depth {
                tracing::warn!(
                    "Skipping sitemap {}: nesting exceeds max depth {}",
                    url,
                    self.max_depth
                );
                return;
            }

            // A URL already on the current path is a cycle; siblings may repeat
            if !walk.ancestors.insert(url.clone()) {
                tracing::warn!("Skipping sitemap {}: it references itself (cycle)", url);
                return;
            }

            self.visit(&url, depth, walk).await;
            walk.ancestors.remove(&url);
        })
    }

    async fn visit(&self, url: &str, depth: u32, walk: &mut Walk) {
        tracing::debug!("Fetching sitemap links from {}", url);
        let entries = match fetch_sitemap(&self.client, url).await {
            Ok(body) => match parse_sitemap(&body) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Failed to parse sitemap {}: {}", url, e);
                    walk.failed_sitemaps += 1;
                    return;
                }
            },
            Err(e) => {
                tracing::warn!("Failed to fetch sitemap {}: {}", url, e);
                walk.failed_sitemaps += 1;
                return;
            }
        };

        let before = walk.links.len();
        for entry in entries {
            match entry {
                SitemapEntry::Sitemap(child) => {
                    self.expand_into(child, depth + 1, walk).await;
                }
                SitemapEntry::Url(loc) => match parse_absolute_url(&loc) {
                    Some(_) => walk.links.push(loc),
                    None => tracing::debug!("Ignoring non-absolute loc {:?} in {}", loc, url),
                },
            }
        }

        tracing::debug!("Fetched {} links from {}", walk.links.len() - before, url);
    }
}
