//! Link-Indexer main entry point
//!
//! This is the command-line interface for the Link-Indexer sitemap submitter.

use clap::Parser;
use link_indexer::api::GoogleConnector;
use link_indexer::config::{
    load_config_with_hash, resolve_domains, resolve_messaging, Config, DomainDescriptor,
};
use link_indexer::http::build_http_client;
use link_indexer::indexer::{run_all, PipelineContext};
use link_indexer::notify::build_notifier;
use link_indexer::output::{load_statistics, print_statistics};
use link_indexer::sitemap::SitemapExpander;
use link_indexer::storage::open_domain_store;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Link-Indexer: a quota-aware search-index submitter
///
/// Link-Indexer expands each configured domain's sitemap into a list of
/// pages and submits them to the indexing API, remembering across runs
/// which pages were indexed, which failed and which are still pending.
#[derive(Parser, Debug)]
#[command(name = "link-indexer")]
#[command(version = "1.0.0")]
#[command(about = "A quota-aware search-index submitter", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Only process the named domain
    #[arg(long, value_name = "NAME")]
    domain: Option<String>,

    /// Validate config and show what would be submitted without contacting any service
    #[arg(long, conflicts_with = "status")]
    dry_run: bool,

    /// Show per-domain link statistics from the state directory and exit
    #[arg(long, conflicts_with = "dry_run")]
    status: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let lookup = |name: &str| std::env::var(name).ok();
    let mut domains = resolve_domains(&config, lookup);
    if let Some(only) = &cli.domain {
        domains.retain(|d| &d.name == only);
        if domains.is_empty() {
            anyhow::bail!("Domain {} is not configured", only);
        }
    }

    if cli.dry_run {
        handle_dry_run(&config, &domains);
    } else if cli.status {
        handle_status(&config, &domains)?;
    } else {
        handle_run(config, domains).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_indexer=info,warn"),
            1 => EnvFilter::new("link_indexer=debug,info"),
            2 => EnvFilter::new("link_indexer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &Config, domains: &[DomainDescriptor]) {
    println!("=== Link-Indexer Dry Run ===\n");

    println!("Indexer Configuration:");
    println!("  State directory: {}", config.indexer.state_dir.display());
    println!("  Pacing: {}ms", config.indexer.pacing_ms);
    println!(
        "  Request timeout: {}s",
        config.indexer.request_timeout_secs
    );
    println!("  Max sitemap depth: {}", config.indexer.max_sitemap_depth);
    println!(
        "  Quota re-check interval: {}",
        config.indexer.quota_check_interval
    );
    println!("  API endpoint: {}", config.indexer.api_endpoint);

    println!("\nNotifications:");
    if config.notifier.enabled {
        println!("  Endpoint: {}", config.notifier.endpoint);
        match resolve_messaging(&config.notifier, |name| std::env::var(name).ok()) {
            Ok(_) => println!("  Credentials: present"),
            Err(e) => println!("  Credentials: {}", e),
        }
    } else {
        println!("  Disabled (logged only)");
    }

    println!("\nDomains ({}):", domains.len());
    for domain in domains {
        let credentials = if domain.credentials.is_some() {
            "credentials present"
        } else {
            "credentials MISSING"
        };
        println!(
            "  - {} (limit {}, {})",
            domain.name, domain.limit, credentials
        );
        println!("    * sitemap: {}", domain.sitemap_url);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --status mode: prints link counts for each domain
fn handle_status(config: &Config, domains: &[DomainDescriptor]) -> anyhow::Result<()> {
    println!("State directory: {}\n", config.indexer.state_dir.display());

    for domain in domains {
        let store = open_domain_store(&config.indexer.state_dir, &domain.name);
        let stats = load_statistics(&store)?;
        print_statistics(&domain.name, &stats);
    }

    Ok(())
}

/// Handles the main indexing run
///
/// Per-domain failures are reported and notified, not returned; only setup
/// errors fail the process.
async fn handle_run(config: Config, domains: Vec<DomainDescriptor>) -> anyhow::Result<()> {
    let messaging = resolve_messaging(&config.notifier, |name| std::env::var(name).ok())?;
    let client = build_http_client(&config.indexer)?;

    let ctx = PipelineContext {
        connector: Arc::new(GoogleConnector::new(
            client.clone(),
            &config.indexer.api_endpoint,
        )),
        expander: SitemapExpander::new(client.clone(), config.indexer.max_sitemap_depth),
        notifier: build_notifier(client, &config.notifier, messaging),
        settings: config.indexer,
    };

    tracing::info!("Processing {} domains", domains.len());
    let summary = run_all(&ctx, domains).await;

    let aborted = summary.aborted_domains();
    if !aborted.is_empty() {
        tracing::warn!("Aborted domains: {}", aborted.join(", "));
    }

    Ok(())
}
