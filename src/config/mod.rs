//! Configuration module for Link-Indexer
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and resolving the per-run values (credentials, messaging tokens) that come
//! from the environment.
//!
//! # Example
//!
//! ```no_run
//! use link_indexer::config::{load_config, resolve_domains};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("indexer.toml")).unwrap();
//! let domains = resolve_domains(&config, |name| std::env::var(name).ok());
//! println!("Will index {} domains", domains.len());
//! ```

mod descriptor;
mod parser;
mod types;
mod validation;

// Re-export types
pub use descriptor::{resolve_domains, resolve_messaging, DomainDescriptor, MessagingCredentials};
pub use types::{
    Config, DomainConfig, IndexerSettings, NotifierConfig, DEFAULT_API_ENDPOINT,
    DEFAULT_NOTIFIER_ENDPOINT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
