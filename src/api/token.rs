//! OAuth2 access tokens for a service account
//!
//! Uses the JWT-bearer grant: a short-lived RS256 assertion signed with the
//! service-account key is exchanged at the key's token URI. The token is
//! fetched on first use and reused until shortly before it expires.

use crate::api::ServiceAccountKey;
use crate::IndexerError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// OAuth scope of the indexing API
pub const INDEXING_SCOPE: &str = "https://www.googleapis.com/auth/indexing";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Hands out access tokens for one service account
pub struct TokenProvider {
    client: Client,
    key: ServiceAccountKey,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(client: Client, key: ServiceAccountKey) -> Self {
        Self {
            client,
            key,
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid access token, exchanging a new assertion if needed
    pub async fn access_token(&self) -> Result<String, IndexerError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let token = self.exchange(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, IndexerError> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: INDEXING_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.key.signing_key,
        )
        .map_err(|e| IndexerError::Token(format!("failed to sign assertion: {}", e)))
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken, IndexerError> {
        let assertion = self.sign_assertion(now)?;

        tracing::debug!("Requesting access token for {}", self.key.client_email);
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|source| IndexerError::Http {
                url: self.key.token_uri.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IndexerError::Token(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| IndexerError::Token(format!("invalid token response: {}", e)))?;

        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}
