//! Link-Indexer: a quota-aware search-index submitter
//!
//! This crate expands website sitemaps into URL lists and submits them to a
//! search-indexing API, remembering across runs which URLs were indexed, which
//! failed, and which are still pending.

pub mod api;
pub mod config;
pub mod http;
pub mod indexer;
pub mod notify;
pub mod output;
pub mod sitemap;
pub mod state;
pub mod storage;
pub mod submitter;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Indexer operations
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Credential error for {domain}: {message}")]
    Credential { domain: String, message: String },

    #[error("Access token error: {0}")]
    Token(String),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Invalid domain stage transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::DomainStage,
        to: state::DomainStage,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing environment value: {0}")]
    MissingEnv(String),
}

/// Result type alias for Link-Indexer operations
pub type Result<T> = std::result::Result<T, IndexerError>;

// Re-export commonly used types
pub use config::{Config, DomainDescriptor};
pub use indexer::{run_all, run_domain};
pub use state::{DomainStage, LinkSet, SubmissionOutcome};
