//! Service-account credentials
//!
//! The blob is the JSON key file issued for a service account. It is parsed
//! in memory; nothing is ever staged on disk.

use crate::IndexerError;
use jsonwebtoken::EncodingKey;
use serde::Deserialize;
use std::fmt;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Fields of the JSON key file the token grant needs
#[derive(Deserialize)]
struct KeyFile {
    client_email: String,
    private_key: String,
    #[serde(default)]
    token_uri: Option<String>,
}

/// Parsed service-account key
#[derive(Clone)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub token_uri: String,
    pub(crate) signing_key: EncodingKey,
}

impl ServiceAccountKey {
    /// Parses a credential blob
    ///
    /// # Arguments
    ///
    /// * `domain` - Domain the blob belongs to (for error messages only)
    /// * `blob` - The raw JSON key; consumed and dropped before returning
    ///
    /// # Returns
    ///
    /// * `Ok(ServiceAccountKey)` - The key material
    /// * `Err(IndexerError::Credential)` - The blob is empty, not JSON, lacks
    ///   required fields, or holds an unusable private key
    pub fn from_blob(domain: &str, blob: String) -> Result<Self, IndexerError> {
        let credential_error = |message: String| IndexerError::Credential {
            domain: domain.to_string(),
            message,
        };

        if blob.trim().is_empty() {
            return Err(credential_error("credential blob is empty".to_string()));
        }

        let file: KeyFile = serde_json::from_str(&blob).map_err(|e| {
            credential_error(format!("credential blob is not a service-account key: {}", e))
        })?;
        drop(blob);

        if file.client_email.trim().is_empty() {
            return Err(credential_error("client_email is empty".to_string()));
        }

        let signing_key = EncodingKey::from_rsa_pem(file.private_key.as_bytes())
            .map_err(|e| credential_error(format!("private_key is not a usable RSA key: {}", e)))?;

        Ok(Self {
            client_email: file.client_email,
            token_uri: file
                .token_uri
                .filter(|uri| !uri.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            signing_key,
        })
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("signing_key", &"<redacted>")
            .finish()
    }
}
