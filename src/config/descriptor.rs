//! Per-run values resolved from the configuration and the environment
//!
//! Everything the pipeline needs from the process environment is looked up
//! here, once, and handed to the orchestrator by value.

use crate::config::types::{Config, DomainConfig, NotifierConfig};
use crate::ConfigError;
use std::fmt;

/// Static description of one indexed site plus its credential blob
#[derive(Clone)]
pub struct DomainDescriptor {
    pub name: String,
    /// Raw service-account blob; `None` when the environment value is absent or blank
    pub credentials: Option<String>,
    pub sitemap_url: String,
    pub limit: u32,
    pub probe_url: String,
    pub probe_quota: bool,
}

impl DomainDescriptor {
    /// Builds a descriptor from its config entry and an already looked-up credential blob
    pub fn from_config(entry: &DomainConfig, credentials: Option<String>) -> Self {
        let probe_url = entry
            .probe_url
            .clone()
            .unwrap_or_else(|| format!("https://{}", entry.name));

        Self {
            name: entry.name.clone(),
            credentials: credentials.filter(|blob| !blob.trim().is_empty()),
            sitemap_url: entry.sitemap.clone(),
            limit: entry.limit,
            probe_url,
            probe_quota: entry.probe_quota,
        }
    }
}

// The credential blob must never reach the logs.
impl fmt::Debug for DomainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainDescriptor")
            .field("name", &self.name)
            .field(
                "credentials",
                &self.credentials.as_ref().map(|_| "<redacted>"),
            )
            .field("sitemap_url", &self.sitemap_url)
            .field("limit", &self.limit)
            .field("probe_url", &self.probe_url)
            .field("probe_quota", &self.probe_quota)
            .finish()
    }
}

/// Recipient and token for the notification transport
#[derive(Clone)]
pub struct MessagingCredentials {
    pub recipient_id: String,
    pub token: String,
}

impl fmt::Debug for MessagingCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagingCredentials")
            .field("recipient_id", &self.recipient_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Resolves every configured domain into a descriptor
///
/// A missing credential blob is not an error here: the orchestrator aborts
/// only that domain and reports it.
///
/// # Arguments
///
/// * `config` - The loaded configuration
/// * `lookup` - Environment lookup (`std::env::var(..).ok()` in production)
pub fn resolve_domains<F>(config: &Config, lookup: F) -> Vec<DomainDescriptor>
where
    F: Fn(&str) -> Option<String>,
{
    config
        .domains
        .iter()
        .map(|entry| DomainDescriptor::from_config(entry, lookup(&entry.credentials_env)))
        .collect()
}

/// Resolves the messaging recipient and token
///
/// Returns `Ok(None)` when notifications are disabled.
///
/// # Returns
///
/// * `Err(ConfigError::MissingEnv)` - Notifications are enabled but a value is absent
pub fn resolve_messaging<F>(
    config: &NotifierConfig,
    lookup: F,
) -> Result<Option<MessagingCredentials>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !config.enabled {
        return Ok(None);
    }

    let required = |name: &str| {
        lookup(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnv(name.to_string()))
    };

    Ok(Some(MessagingCredentials {
        recipient_id: required(&config.recipient_env)?,
        token: required(&config.token_env)?,
    }))
}
