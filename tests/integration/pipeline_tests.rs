//! End-to-end domain runs against file-backed state

use crate::support::{
    descriptor, page_urls, sitemap_index_xml, test_context, urlset_xml, RecordingNotifier,
    ScriptedConnector,
};
use link_indexer::indexer::{run_all, run_domain};
use link_indexer::output::DomainOutcome;
use link_indexer::state::{DomainStage, LinkSet};
use link_indexer::storage::{open_domain_store, FileLinkStore, LinkStore};
use link_indexer::submitter::StopReason;
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOMAIN: &str = "example.com";
const BASE: &str = "https://example.com";

fn seeded_store(dir: &TempDir, pending: &[String]) -> FileLinkStore {
    let mut store = open_domain_store(dir.path(), DOMAIN);
    store.save(LinkSet::Pending, pending).unwrap();
    store
}

/// The three sets must never share a URL
fn assert_disjoint(store: &FileLinkStore) {
    let pending: HashSet<String> = store.load(LinkSet::Pending).unwrap().into_iter().collect();
    let indexed: HashSet<String> = store.load(LinkSet::Indexed).unwrap().into_iter().collect();
    let failed: HashSet<String> = store.load(LinkSet::Failed).unwrap().into_iter().collect();

    assert!(pending.is_disjoint(&indexed), "pending and indexed overlap");
    assert!(pending.is_disjoint(&failed), "pending and failed overlap");
    assert!(indexed.is_disjoint(&failed), "indexed and failed overlap");
}

#[tokio::test]
async fn test_quota_on_third_submission() {
    let dir = TempDir::new().unwrap();
    let connector = Arc::new(ScriptedConnector::quota_from(2));
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = test_context(dir.path(), connector.clone(), notifier.clone());
    let pending = page_urls(BASE, 10);
    let mut store = seeded_store(&dir, &pending);

    let report = run_domain(
        &ctx,
        descriptor(DOMAIN, "unused", 200, Some("{}")),
        &mut store,
    )
    .await;

    assert_eq!(report.submitted, 2);
    assert_eq!(
        report.outcome,
        DomainOutcome::Completed(StopReason::QuotaExceeded)
    );
    assert_eq!(connector.log.submitted().len(), 3);

    assert_eq!(store.load(LinkSet::Indexed).unwrap(), pending[..2].to_vec());
    assert_eq!(store.load(LinkSet::Pending).unwrap(), pending[2..].to_vec());
    assert!(store.load(LinkSet::Failed).unwrap().is_empty());
    assert_disjoint(&store);

    let messages = notifier.messages();
    let alerts: Vec<_> = messages
        .iter()
        .filter(|m| m.contains("quota exceeded"))
        .collect();
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        messages.last().unwrap(),
        "example.com - submitted 2 of 200 links."
    );
}

#[tokio::test]
async fn test_limit_leaves_remainder_for_next_run() {
    let dir = TempDir::new().unwrap();
    let connector = Arc::new(ScriptedConnector::succeeding());
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = test_context(dir.path(), connector.clone(), notifier.clone());
    let pending = page_urls(BASE, 500);
    let mut store = seeded_store(&dir, &pending);

    let report = run_domain(
        &ctx,
        descriptor(DOMAIN, "unused", 200, Some("{}")),
        &mut store,
    )
    .await;

    assert_eq!(report.submitted, 200);
    assert_eq!(report.remaining_pending, Some(300));
    assert_eq!(report.stage, DomainStage::Reported);
    assert_eq!(
        store.load(LinkSet::Indexed).unwrap(),
        pending[..200].to_vec()
    );
    assert_eq!(
        store.load(LinkSet::Pending).unwrap(),
        pending[200..].to_vec()
    );
    assert_disjoint(&store);
    assert_eq!(
        notifier.messages(),
        vec!["example.com - submitted 200 of 200 links."]
    );
}

#[tokio::test]
async fn test_rejected_url_lands_in_failed_file_and_error_log() {
    let dir = TempDir::new().unwrap();
    let pending = page_urls(BASE, 4);
    let connector = Arc::new(ScriptedConnector::rejecting(&pending[1..2]));
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = test_context(dir.path(), connector.clone(), notifier.clone());
    let mut store = seeded_store(&dir, &pending);

    let report = run_domain(
        &ctx,
        descriptor(DOMAIN, "unused", 200, Some("{}")),
        &mut store,
    )
    .await;

    assert_eq!(report.submitted, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(
        report.outcome,
        DomainOutcome::Completed(StopReason::Exhausted)
    );

    let domain_dir = dir.path().join(DOMAIN);
    assert_eq!(
        std::fs::read_to_string(domain_dir.join("failed.txt")).unwrap(),
        format!("{}\n", pending[1])
    );
    assert_eq!(
        std::fs::read_to_string(domain_dir.join("errors.log")).unwrap(),
        format!("{}: HTTP 400: invalid URL\n", pending[1])
    );
    assert_eq!(
        store.load(LinkSet::Indexed).unwrap(),
        vec![pending[0].clone(), pending[2].clone(), pending[3].clone()]
    );
    assert!(store.load(LinkSet::Pending).unwrap().is_empty());
    assert_disjoint(&store);

    // Failures are not alerts; only the summary goes out
    assert_eq!(
        notifier.messages(),
        vec!["example.com - submitted 3 of 200 links."]
    );
}

#[tokio::test]
async fn test_missing_credentials_touch_nothing() {
    let dir = TempDir::new().unwrap();
    let connector = Arc::new(ScriptedConnector::succeeding());
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = test_context(dir.path(), connector.clone(), notifier.clone());

    let summary = run_all(&ctx, vec![descriptor(DOMAIN, "unused", 200, None)]).await;

    assert_eq!(summary.aborted_domains(), vec![DOMAIN]);
    assert_eq!(summary.total_submitted(), 0);
    assert_eq!(connector.log.connects(), 0);
    assert!(connector.log.submitted().is_empty());
    assert_eq!(notifier.messages().len(), 1);
    assert!(!dir.path().join(DOMAIN).exists());
}

#[tokio::test]
async fn test_aborted_domain_does_not_stop_others() {
    let dir = TempDir::new().unwrap();
    let connector = Arc::new(ScriptedConnector::succeeding());
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = test_context(dir.path(), connector.clone(), notifier.clone());

    let mut other = open_domain_store(dir.path(), "other.org");
    other
        .save(LinkSet::Pending, &page_urls("https://other.org", 3))
        .unwrap();

    let summary = run_all(
        &ctx,
        vec![
            descriptor(DOMAIN, "unused", 10, None),
            descriptor("other.org", "unused", 10, Some("{}")),
        ],
    )
    .await;

    assert_eq!(summary.reports.len(), 2);
    assert_eq!(summary.aborted_domains(), vec![DOMAIN]);
    assert_eq!(summary.total_submitted(), 3);
    assert_eq!(
        other.load(LinkSet::Indexed).unwrap(),
        page_urls("https://other.org", 3)
    );
}

#[tokio::test]
async fn test_second_run_resubmits_nothing() {
    let dir = TempDir::new().unwrap();
    let connector = Arc::new(ScriptedConnector::succeeding());
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = test_context(dir.path(), connector.clone(), notifier.clone());
    let pending = page_urls(BASE, 5);
    let mut store = seeded_store(&dir, &pending);

    // Pending still lists the indexed URLs, as after an interrupted run
    store.save(LinkSet::Indexed, &pending[..3]).unwrap();

    let report = run_domain(
        &ctx,
        descriptor(DOMAIN, "unused", 200, Some("{}")),
        &mut store,
    )
    .await;

    assert_eq!(report.submitted, 2);
    assert_eq!(connector.log.submitted(), pending[3..].to_vec());
    assert!(store.load(LinkSet::Pending).unwrap().is_empty());
    assert_eq!(store.load(LinkSet::Indexed).unwrap(), pending);
    assert_disjoint(&store);
}

#[tokio::test]
async fn test_empty_pending_expands_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();
    let pages = page_urls(&base, 4);

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sitemap_index_xml(&[format!("{}/pages.xml", base)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset_xml(&pages)))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let connector = Arc::new(ScriptedConnector::succeeding());
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = test_context(dir.path(), connector.clone(), notifier.clone());

    let mut store = open_domain_store(dir.path(), DOMAIN);
    // Already indexed last time; must not come back as pending
    store.save(LinkSet::Indexed, &pages[..1]).unwrap();

    let sitemap = format!("{}/sitemap.xml", base);
    let report = run_domain(
        &ctx,
        descriptor(DOMAIN, &sitemap, 2, Some("{}")),
        &mut store,
    )
    .await;

    assert_eq!(report.submitted, 2);
    assert_eq!(connector.log.submitted(), pages[1..3].to_vec());
    assert_eq!(store.load(LinkSet::Indexed).unwrap(), pages[..3].to_vec());
    assert_eq!(store.load(LinkSet::Pending).unwrap(), pages[3..].to_vec());
    assert_disjoint(&store);
}

#[tokio::test]
async fn test_unreachable_sitemap_completes_with_nothing_submitted() {
    let dir = TempDir::new().unwrap();
    let connector = Arc::new(ScriptedConnector::succeeding());
    let notifier = Arc::new(RecordingNotifier::default());
    let ctx = test_context(dir.path(), connector.clone(), notifier.clone());
    let mut store = open_domain_store(dir.path(), DOMAIN);

    let report = run_domain(
        &ctx,
        descriptor(DOMAIN, "http://127.0.0.1:9/sitemap.xml", 200, Some("{}")),
        &mut store,
    )
    .await;

    assert!(!report.is_aborted());
    assert_eq!(report.submitted, 0);
    assert_eq!(
        report.outcome,
        DomainOutcome::Completed(StopReason::Exhausted)
    );
    assert!(connector.log.submitted().is_empty());
    assert_eq!(
        notifier.messages(),
        vec!["example.com - submitted 0 of 200 links."]
    );
}
