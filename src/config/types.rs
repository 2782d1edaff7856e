use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default base URL of the indexing API
pub const DEFAULT_API_ENDPOINT: &str = "https://indexing.googleapis.com";

/// Default base URL of the messaging bot API
pub const DEFAULT_NOTIFIER_ENDPOINT: &str = "https://api.telegram.org";

/// Main configuration structure for Link-Indexer
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub indexer: IndexerSettings,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default, rename = "domain")]
    pub domains: Vec<DomainConfig>,
}

/// Pipeline behavior shared by every domain
#[derive(Debug, Clone, Deserialize)]
pub struct IndexerSettings {
    /// Root directory holding one state directory per domain
    #[serde(rename = "state-dir")]
    pub state_dir: PathBuf,

    /// Delay between consecutive submission attempts (milliseconds)
    #[serde(rename = "pacing-ms", default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Timeout applied to every outbound HTTP call (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum nesting of sitemap indexes followed during expansion
    #[serde(rename = "max-sitemap-depth", default = "default_max_sitemap_depth")]
    pub max_sitemap_depth: u32,

    /// Re-probe the quota after this many attempted submissions (0 disables)
    #[serde(rename = "quota-check-interval", default = "default_quota_check_interval")]
    pub quota_check_interval: u32,

    /// Base URL of the indexing API
    #[serde(rename = "api-endpoint", default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// User agent sent with sitemap and API requests
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl IndexerSettings {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Notification channel configuration
///
/// The recipient and token are never stored in the file; the config only names
/// the environment variables that hold them.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the bot API
    #[serde(default = "default_notifier_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the recipient (chat) id
    #[serde(rename = "recipient-env", default = "default_recipient_env")]
    pub recipient_env: String,

    /// Environment variable holding the transport token
    #[serde(rename = "token-env", default = "default_token_env")]
    pub token_env: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_notifier_endpoint(),
            recipient_env: default_recipient_env(),
            token_env: default_token_env(),
        }
    }
}

/// One indexed site
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    /// Site name, also used as the state directory name (e.g., "med.example.com")
    pub name: String,

    /// Root sitemap or sitemap index URL
    pub sitemap: String,

    /// Maximum number of successful submissions per run
    pub limit: u32,

    /// Environment variable holding the service-account credential blob
    #[serde(rename = "credentials-env")]
    pub credentials_env: String,

    /// URL used for the quota probe (defaults to `https://<name>`)
    #[serde(rename = "probe-url", default)]
    pub probe_url: Option<String>,

    /// Whether to probe the quota before submitting
    #[serde(rename = "probe-quota", default = "default_true")]
    pub probe_quota: bool,
}

fn default_pacing_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_sitemap_depth() -> u32 {
    10
}

fn default_quota_check_interval() -> u32 {
    100
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    format!("link-indexer/{}", env!("CARGO_PKG_VERSION"))
}

fn default_notifier_endpoint() -> String {
    DEFAULT_NOTIFIER_ENDPOINT.to_string()
}

fn default_recipient_env() -> String {
    "TELEGRAM_CHAT_ID".to_string()
}

fn default_token_env() -> String {
    "TELEGRAM_TOKEN".to_string()
}

fn default_true() -> bool {
    true
}
