use crate::config::types::{Config, DomainConfig, IndexerSettings, NotifierConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_indexer_settings(&config.indexer)?;
    validate_notifier_config(&config.notifier)?;
    validate_domains(&config.domains)?;
    Ok(())
}

/// Validates pipeline settings
fn validate_indexer_settings(settings: &IndexerSettings) -> Result<(), ConfigError> {
    if settings.state_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "state_dir cannot be empty".to_string(),
        ));
    }

    if settings.pacing_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "pacing_ms must be >= 100ms, got {}ms",
            settings.pacing_ms
        )));
    }

    if settings.request_timeout_secs < 1 || settings.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            settings.request_timeout_secs
        )));
    }

    if settings.max_sitemap_depth < 1 || settings.max_sitemap_depth > 32 {
        return Err(ConfigError::Validation(format!(
            "max_sitemap_depth must be between 1 and 32, got {}",
            settings.max_sitemap_depth
        )));
    }

    validate_http_url("api_endpoint", &settings.api_endpoint)?;

    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates notifier configuration
fn validate_notifier_config(config: &NotifierConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    validate_http_url("notifier endpoint", &config.endpoint)?;
    validate_env_name(&config.recipient_env)?;
    validate_env_name(&config.token_env)?;

    Ok(())
}

/// Validates domain entries
fn validate_domains(domains: &[DomainConfig]) -> Result<(), ConfigError> {
    if domains.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[domain]] entry is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for entry in domains {
        validate_domain_name(&entry.name)?;

        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Domain '{}' is configured more than once",
                entry.name
            )));
        }

        validate_http_url(&format!("sitemap for '{}'", entry.name), &entry.sitemap)?;

        if entry.limit < 1 {
            return Err(ConfigError::Validation(format!(
                "Domain '{}' limit must be >= 1, got {}",
                entry.name, entry.limit
            )));
        }

        validate_env_name(&entry.credentials_env)?;

        if let Some(probe_url) = &entry.probe_url {
            validate_http_url(&format!("probe_url for '{}'", entry.name), probe_url)?;
        }
    }

    Ok(())
}

/// Validates that a value is an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

/// Validates an environment variable name
fn validate_env_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "environment variable name cannot be empty".to_string(),
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::Validation(format!(
            "Environment variable name '{}' may only contain letters, digits and '_'",
            name
        )));
    }

    Ok(())
}

/// Validates a domain name used as a state directory key
fn validate_domain_name(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::Validation(
            "Domain name cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}
