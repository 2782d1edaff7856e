use crate::state::UrlSet;
use url::Url;

/// Normalizes one stored or discovered link
///
/// Links are compared as exact strings, so the only rewrite is trimming the
/// surrounding whitespace (including the line terminators older state files
/// may carry).
///
/// # Returns
///
/// * `Some(String)` - The trimmed link
/// * `None` - The line was blank
///
/// # Examples
///
/// ```
/// use link_indexer::url::normalize_link;
///
/// assert_eq!(normalize_link("  https://example.com/a \r\n").as_deref(), Some("https://example.com/a"));
/// assert_eq!(normalize_link("   "), None);
/// ```
pub fn normalize_link(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes a sequence of links into an ordered set
///
/// Blank lines are dropped and only the first occurrence of a link is kept.
pub fn normalize_links<I, S>(raw: I) -> UrlSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    UrlSet::from_links(raw.into_iter().filter_map(|s| normalize_link(s.as_ref())))
}

/// Parses a sitemap `<loc>` value, accepting only absolute http(s) URLs
///
/// # Returns
///
/// * `Some(Url)` - The parsed URL
/// * `None` - The value is relative, malformed, or uses another scheme
pub fn parse_absolute_url(loc: &str) -> Option<Url> {
    let url = Url::parse(loc.trim()).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.host_str()?;
    Some(url)
}
