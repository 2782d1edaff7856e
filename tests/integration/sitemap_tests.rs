//! Sitemap expansion against mock hosts

use crate::support::{page_urls, sitemap_index_xml, urlset_xml};
use link_indexer::sitemap::SitemapExpander;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_index_expands_in_document_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    let first = page_urls(&format!("{}/a", base), 3);
    let second = page_urls(&format!("{}/b", base), 5);

    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index_xml(&[
            format!("{}/sitemap-a.xml", base),
            format!("{}/sitemap-b.xml", base),
        ]),
    )
    .await;
    mount_xml(&server, "/sitemap-a.xml", urlset_xml(&first)).await;
    mount_xml(&server, "/sitemap-b.xml", urlset_xml(&second)).await;

    let expander = SitemapExpander::new(reqwest::Client::new(), 10);
    let links = expander.expand(&format!("{}/sitemap.xml", base)).await;

    let expected: Vec<String> = first.into_iter().chain(second).collect();
    assert_eq!(links.len(), 8);
    assert_eq!(links, expected);
}

#[tokio::test]
async fn test_server_error_yields_empty_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let expander = SitemapExpander::new(reqwest::Client::new(), 10);
    let links = expander.expand(&format!("{}/sitemap.xml", server.uri())).await;

    assert!(links.is_empty());
}

#[tokio::test]
async fn test_failed_child_does_not_lose_siblings() {
    let server = MockServer::start().await;
    let base = server.uri();
    let pages = page_urls(&base, 2);

    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index_xml(&[
            format!("{}/missing.xml", base),
            format!("{}/pages.xml", base),
        ]),
    )
    .await;
    mount_xml(&server, "/pages.xml", urlset_xml(&pages)).await;
    Mock::given(method("GET"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let expander = SitemapExpander::new(reqwest::Client::new(), 10);
    let links = expander.expand(&format!("{}/sitemap.xml", base)).await;

    assert_eq!(links, pages);
}

#[tokio::test]
async fn test_self_referencing_index_terminates() {
    let server = MockServer::start().await;
    let base = server.uri();
    let pages = page_urls(&base, 2);

    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index_xml(&[
            format!("{}/sitemap.xml", base),
            format!("{}/pages.xml", base),
        ]),
    )
    .await;
    mount_xml(&server, "/pages.xml", urlset_xml(&pages)).await;

    let expander = SitemapExpander::new(reqwest::Client::new(), 10);
    let links = expander.expand(&format!("{}/sitemap.xml", base)).await;

    assert_eq!(links, pages);
}

#[tokio::test]
async fn test_child_listed_twice_is_expanded_twice() {
    let server = MockServer::start().await;
    let base = server.uri();
    let pages = page_urls(&base, 2);

    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index_xml(&[
            format!("{}/pages.xml", base),
            format!("{}/pages.xml", base),
        ]),
    )
    .await;
    mount_xml(&server, "/pages.xml", urlset_xml(&pages)).await;

    let expander = SitemapExpander::new(reqwest::Client::new(), 10);
    let links = expander.expand(&format!("{}/sitemap.xml", base)).await;

    let expected: Vec<String> = pages.iter().chain(pages.iter()).cloned().collect();
    assert_eq!(links, expected);
}

#[tokio::test]
async fn test_depth_limit_stops_nested_indexes() {
    let server = MockServer::start().await;
    let base = server.uri();

    // sitemap.xml -> level1.xml -> level2.xml (urlset)
    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index_xml(&[format!("{}/level1.xml", base)]),
    )
    .await;
    mount_xml(
        &server,
        "/level1.xml",
        sitemap_index_xml(&[format!("{}/level2.xml", base)]),
    )
    .await;
    mount_xml(&server, "/level2.xml", urlset_xml(&page_urls(&base, 1))).await;

    let shallow = SitemapExpander::new(reqwest::Client::new(), 1);
    assert!(shallow.expand(&format!("{}/sitemap.xml", base)).await.is_empty());

    let deep = SitemapExpander::new(reqwest::Client::new(), 2);
    assert_eq!(
        deep.expand(&format!("{}/sitemap.xml", base)).await,
        page_urls(&base, 1)
    );
}
