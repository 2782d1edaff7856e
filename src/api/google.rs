//! Google Indexing API v3 client
//!
//! # Status mapping
//!
//! | Response | Submit outcome | Probe status |
//! |----------|----------------|--------------|
//! | 2xx | Success(payload) | Available |
//! | 404 | TransientFailure | Available (URL not yet known) |
//! | 429 | QuotaExceeded | Unavailable |
//! | 503 | ServiceUnavailable | Unavailable |
//! | 401, or no access token | CredentialError | Unavailable |
//! | other status / network error | TransientFailure | Unavailable |

use crate::api::{ApiConnector, IndexingApi, ServiceAccountKey, TokenProvider};
use crate::state::{QuotaStatus, SubmissionOutcome};
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

/// Longest response excerpt kept in a failure reason
const MAX_REASON_LEN: usize = 200;

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    url: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Indexing API client for one domain's service account
pub struct GoogleIndexingClient {
    client: Client,
    endpoint: String,
    tokens: TokenProvider,
}

impl GoogleIndexingClient {
    /// Creates a client
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `endpoint` - API base URL (e.g., "https://indexing.googleapis.com")
    /// * `key` - The domain's service-account key
    pub fn new(client: Client, endpoint: &str, key: ServiceAccountKey) -> Self {
        Self {
            tokens: TokenProvider::new(client.clone(), key),
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    fn publish_url(&self) -> String {
        format!("{}/v3/urlNotifications:publish", self.endpoint)
    }

    fn metadata_url(&self) -> String {
        format!("{}/v3/urlNotifications/metadata", self.endpoint)
    }
}

#[async_trait]
impl IndexingApi for GoogleIndexingClient {
    async fn submit(&self, url: &str) -> SubmissionOutcome {
        let token = match self.tokens.access_token().await {
            Ok(token) => token,
            Err(e) => return SubmissionOutcome::CredentialError(e.to_string()),
        };

        let body = PublishRequest {
            url,
            kind: "URL_UPDATED",
        };

        let response = match self
            .client
            .post(self.publish_url())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return SubmissionOutcome::TransientFailure(describe_transport_error(&e)),
        };

        classify_submit(response).await
    }

    async fn probe_quota(&self, url: &str) -> QuotaStatus {
        let token = match self.tokens.access_token().await {
            Ok(token) => token,
            Err(e) => return QuotaStatus::Unavailable(e.to_string()),
        };

        let response = match self
            .client
            .get(self.metadata_url())
            .bearer_auth(token)
            .query(&[("url", url)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return QuotaStatus::Unavailable(describe_transport_error(&e)),
        };

        classify_probe(response).await
    }
}

/// Maps a publish response to a submission outcome
async fn classify_submit(response: Response) -> SubmissionOutcome {
    let status = response.status();

    if status.is_success() {
        let payload = response.json::<Value>().await.unwrap_or(Value::Null);
        return SubmissionOutcome::Success(payload);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => SubmissionOutcome::QuotaExceeded,
        StatusCode::SERVICE_UNAVAILABLE => SubmissionOutcome::ServiceUnavailable,
        StatusCode::UNAUTHORIZED => {
            SubmissionOutcome::CredentialError(failure_reason(status, response).await)
        }
        _ => SubmissionOutcome::TransientFailure(failure_reason(status, response).await),
    }
}

/// Maps a metadata response to a quota status
async fn classify_probe(response: Response) -> QuotaStatus {
    let status = response.status();

    if status.is_success() || status == StatusCode::NOT_FOUND {
        return QuotaStatus::Available;
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => QuotaStatus::Unavailable("quota exceeded".to_string()),
        StatusCode::SERVICE_UNAVAILABLE => {
            QuotaStatus::Unavailable("service unavailable".to_string())
        }
        _ => QuotaStatus::Unavailable(failure_reason(status, response).await),
    }
}

async fn failure_reason(status: StatusCode, response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    let excerpt: String = body.trim().chars().take(MAX_REASON_LEN).collect();

    if excerpt.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {}", status.as_u16(), excerpt)
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        "connection failed".to_string()
    } else {
        e.to_string()
    }
}

/// Connects domains to the Google Indexing API
#[derive(Debug, Clone)]
pub struct GoogleConnector {
    client: Client,
    endpoint: String,
}

impl GoogleConnector {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

impl ApiConnector for GoogleConnector {
    fn connect(&self, domain: &str, credentials: String) -> Result<Box<dyn IndexingApi>> {
        let key = ServiceAccountKey::from_blob(domain, credentials)?;
        tracing::debug!("Loaded service account {} for {}", key.client_email, domain);

        Ok(Box::new(GoogleIndexingClient::new(
            self.client.clone(),
            &self.endpoint,
            key,
        )))
    }
}
