//! Test doubles and fixtures shared by the integration tests

use async_trait::async_trait;
use link_indexer::api::{ApiConnector, IndexingApi};
use link_indexer::config::{DomainDescriptor, IndexerSettings};
use link_indexer::indexer::PipelineContext;
use link_indexer::notify::Notifier;
use link_indexer::sitemap::SitemapExpander;
use link_indexer::state::{QuotaStatus, SubmissionOutcome};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Test RSA key for the service-account fixture
pub const TEST_KEY_PEM: &str = include_str!("fixtures/test_key.pem");

/// Builds a service-account key file whose token URI points at `token_uri`
pub fn service_account_json(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "client_email": "indexer@test-project.iam.gserviceaccount.com",
        "private_key": TEST_KEY_PEM,
        "token_uri": token_uri,
    })
    .to_string()
}

/// Shared record of what the scripted API saw
#[derive(Default)]
pub struct ApiLog {
    pub submitted: Mutex<Vec<String>>,
    pub probes: Mutex<usize>,
    pub connects: Mutex<usize>,
}

impl ApiLog {
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn connects(&self) -> usize {
        *self.connects.lock().unwrap()
    }
}

/// Indexing API double: succeeds except for the URLs scripted otherwise
pub struct ScriptedApi {
    log: Arc<ApiLog>,
    /// Submission index (0-based) from which every call reports an exhausted quota
    quota_from: Option<usize>,
    /// URLs the API rejects
    rejected: Vec<String>,
    probe: QuotaStatus,
}

#[async_trait]
impl IndexingApi for ScriptedApi {
    async fn submit(&self, url: &str) -> SubmissionOutcome {
        let mut submitted = self.log.submitted.lock().unwrap();
        let index = submitted.len();
        submitted.push(url.to_string());

        match self.quota_from {
            Some(from) if index >= from => SubmissionOutcome::QuotaExceeded,
            _ if self.rejected.iter().any(|r| r == url) => {
                SubmissionOutcome::TransientFailure("HTTP 400: invalid URL".to_string())
            }
            _ => SubmissionOutcome::Success(Value::Null),
        }
    }

    async fn probe_quota(&self, _url: &str) -> QuotaStatus {
        *self.log.probes.lock().unwrap() += 1;
        self.probe.clone()
    }
}

/// Hands out `ScriptedApi` handles that all report into one `ApiLog`
pub struct ScriptedConnector {
    pub log: Arc<ApiLog>,
    pub quota_from: Option<usize>,
    pub rejected: Vec<String>,
    pub probe: QuotaStatus,
}

impl ScriptedConnector {
    pub fn succeeding() -> Self {
        Self {
            log: Arc::new(ApiLog::default()),
            quota_from: None,
            rejected: Vec::new(),
            probe: QuotaStatus::Available,
        }
    }

    pub fn rejecting(urls: &[String]) -> Self {
        Self {
            rejected: urls.to_vec(),
            ..Self::succeeding()
        }
    }

    pub fn quota_from(index: usize) -> Self {
        Self {
            quota_from: Some(index),
            ..Self::succeeding()
        }
    }
}

impl ApiConnector for ScriptedConnector {
    fn connect(
        &self,
        _domain: &str,
        _credentials: String,
    ) -> link_indexer::Result<Box<dyn IndexingApi>> {
        *self.log.connects.lock().unwrap() += 1;
        Ok(Box::new(ScriptedApi {
            log: Arc::clone(&self.log),
            quota_from: self.quota_from,
            rejected: self.rejected.clone(),
            probe: self.probe.clone(),
        }))
    }
}

/// Collects every notification
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Settings with no pacing and no periodic re-probe
pub fn test_settings(state_dir: &Path) -> IndexerSettings {
    IndexerSettings {
        state_dir: state_dir.to_path_buf(),
        pacing_ms: 0,
        request_timeout_secs: 5,
        max_sitemap_depth: 10,
        quota_check_interval: 0,
        api_endpoint: "http://127.0.0.1:9".to_string(),
        user_agent: "LinkIndexerTest/1.0".to_string(),
    }
}

pub fn test_context(
    state_dir: &Path,
    connector: Arc<ScriptedConnector>,
    notifier: Arc<RecordingNotifier>,
) -> PipelineContext {
    PipelineContext {
        settings: test_settings(state_dir),
        connector,
        expander: SitemapExpander::new(reqwest::Client::new(), 10),
        notifier,
    }
}

pub fn descriptor(
    name: &str,
    sitemap_url: &str,
    limit: u32,
    credentials: Option<&str>,
) -> DomainDescriptor {
    DomainDescriptor {
        name: name.to_string(),
        credentials: credentials.map(str::to_string),
        sitemap_url: sitemap_url.to_string(),
        limit,
        probe_url: format!("https://{}", name),
        probe_quota: true,
    }
}

/// `count` page URLs under `base`, numbered from 1
pub fn page_urls(base: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{}/page{}", base, i)).collect()
}

/// Renders a `<urlset>` document
pub fn urlset_xml(urls: &[String]) -> String {
    let entries: String = urls
        .iter()
        .map(|u| format!("  <url><loc>{}</loc></url>\n", u))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

/// Renders a `<sitemapindex>` document
pub fn sitemap_index_xml(children: &[String]) -> String {
    let entries: String = children
        .iter()
        .map(|u| format!("  <sitemap><loc>{}</loc></sitemap>\n", u))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    )
}
