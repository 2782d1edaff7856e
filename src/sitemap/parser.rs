//! Sitemap XML parser
//!
//! Handles both document kinds from the sitemaps.org schema:
//!
//! ```xml
//! <sitemapindex><sitemap><loc>https://example.com/a.xml</loc></sitemap></sitemapindex>
//! <urlset><url><loc>https://example.com/page</loc></url></urlset>
//! ```
//!
//! Elements are matched on their local name so namespaced documents parse the
//! same as bare ones.

use crate::sitemap::SitemapError;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// One `<loc>` reference found in a sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapEntry {
    /// Reference to a nested sitemap (from a sitemap index)
    Sitemap(String),
    /// Leaf page URL (from a URL set)
    Url(String),
}

/// Which kind of child element the reader is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Sitemap,
    Url,
}

/// Parses a sitemap or sitemap index document
///
/// # Returns
///
/// The `<loc>` entries in document order. `<loc>` elements outside a
/// `<sitemap>` or `<url>` element are ignored, as are empty ones.
pub fn parse_sitemap(xml: &str) -> Result<Vec<SitemapEntry>, SitemapError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut container: Option<Container> = None;
    let mut loc: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = e.local_name();
                match (depth, name.as_ref()) {
                    (2, b"sitemap") => container = Some(Container::Sitemap),
                    (2, b"url") => container = Some(Container::Url),
                    (3, b"loc") if container.is_some() => loc = Some(String::new()),
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(buf) = loc.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| SitemapError::Xml(err.to_string()))?;
                    buf.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(buf) = loc.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(_)) => {
                if depth == 3 {
                    if let (Some(kind), Some(value)) = (container, loc.take()) {
                        let value = value.trim().to_string();
                        if !value.is_empty() {
                            entries.push(match kind {
                                Container::Sitemap => SitemapEntry::Sitemap(value),
                                Container::Url => SitemapEntry::Url(value),
                            });
                        }
                    }
                } else if depth == 2 {
                    container = None;
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(SitemapError::Xml(format!(
                    "at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    Ok(entries)
}
