//! Per-domain pipeline
//!
//! Stages: `Init → CredentialsLoaded → QuotaChecked → [Expanding] →
//! Submitting → Persisted → Reported`. A missing or unusable credential blob,
//! an unavailable quota, or a storage failure jumps straight to `Reported`
//! with one alert notification and no summary.

use crate::api::{ApiConnector, IndexingApi};
use crate::config::{DomainDescriptor, IndexerSettings};
use crate::notify::Notifier;
use crate::output::{DomainOutcome, DomainReport, RunSummary};
use crate::sitemap::SitemapExpander;
use crate::state::{DomainStage, LinkSet, QuotaStatus, UrlSet};
use crate::storage::{open_domain_store, LinkStore};
use crate::submitter::{SubmissionReport, Submitter, SubmitterSettings};
use crate::url::normalize_links;
use crate::IndexerError;
use std::sync::Arc;

/// Collaborators shared by every domain in a run
pub struct PipelineContext {
    pub settings: IndexerSettings,
    pub connector: Arc<dyn ApiConnector>,
    pub expander: SitemapExpander,
    pub notifier: Arc<dyn Notifier>,
}

/// Tracks a domain's stage and rejects out-of-order transitions
struct StageTracker<'a> {
    domain: &'a str,
    stage: DomainStage,
}

impl<'a> StageTracker<'a> {
    fn new(domain: &'a str) -> Self {
        Self {
            domain,
            stage: DomainStage::Init,
        }
    }

    fn advance(&mut self, to: DomainStage) -> Result<(), IndexerError> {
        if !self.stage.can_transition_to(to) {
            return Err(IndexerError::InvalidTransition {
                from: self.stage,
                to,
            });
        }
        tracing::debug!("{}: {} -> {}", self.domain, self.stage, to);
        self.stage = to;
        Ok(())
    }
}

/// Runs every domain in order, each against its own state directory
///
/// A failing domain never stops the others.
pub async fn run_all(ctx: &PipelineContext, domains: Vec<DomainDescriptor>) -> RunSummary {
    let mut summary = RunSummary::default();

    for descriptor in domains {
        let mut store = open_domain_store(&ctx.settings.state_dir, &descriptor.name);
        let report = run_domain(ctx, descriptor, &mut store).await;
        tracing::info!("{}", report);
        summary.push(report);
    }

    tracing::info!(
        "Indexing process completed, {} links submitted across {} domains",
        summary.total_submitted(),
        summary.reports.len()
    );

    summary
}

/// Runs the pipeline for one domain
///
/// The descriptor is taken by value; its credential blob is handed to the
/// connector and does not outlive handle construction.
///
/// # Returns
///
/// A report for the domain. Aborts are reported, not returned as errors.
pub async fn run_domain(
    ctx: &PipelineContext,
    descriptor: DomainDescriptor,
    store: &mut dyn LinkStore,
) -> DomainReport {
    let DomainDescriptor {
        name,
        credentials,
        sitemap_url,
        limit,
        probe_url,
        probe_quota,
    } = descriptor;

    tracing::info!("Starting indexing for {}", name);
    let mut tracker = StageTracker::new(&name);

    // API handle from the credential blob
    let api = match credentials {
        Some(blob) => ctx.connector.connect(&name, blob),
        None => Err(IndexerError::Credential {
            domain: name.clone(),
            message: "credential blob is missing".to_string(),
        }),
    };
    let api = match api {
        Ok(api) => api,
        Err(e) => {
            let message = format!("Indexing process for {} failed: {}", name, e);
            return abort(ctx, &mut tracker, limit, message).await;
        }
    };
    if let Err(e) = tracker.advance(DomainStage::CredentialsLoaded) {
        return abort(ctx, &mut tracker, limit, e.to_string()).await;
    }

    if probe_quota {
        if let QuotaStatus::Unavailable(reason) = api.probe_quota(&probe_url).await {
            let message = format!(
                "Quota exceeded or service unavailable for {} ({}), skipping indexing.",
                name, reason
            );
            return abort(ctx, &mut tracker, limit, message).await;
        }
    }
    if let Err(e) = tracker.advance(DomainStage::QuotaChecked) {
        return abort(ctx, &mut tracker, limit, e.to_string()).await;
    }

    let submitter_settings = SubmitterSettings {
        pacing: ctx.settings.pacing(),
        quota_check_interval: ctx.settings.quota_check_interval,
        probe_url,
    };
    let outcome = submit_and_persist(
        ctx,
        &mut tracker,
        api.as_ref(),
        store,
        &sitemap_url,
        limit,
        submitter_settings,
    )
    .await;

    let (report, remaining_pending) = match outcome {
        Ok(done) => done,
        Err(e) => {
            let message = format!("Indexing process for {} failed: {}", name, e);
            return abort(ctx, &mut tracker, limit, message).await;
        }
    };

    let mut domain_report = DomainReport {
        domain: name.clone(),
        limit,
        submitted: report.submitted,
        failed: report.failed,
        remaining_pending: Some(remaining_pending),
        stage: tracker.stage,
        outcome: DomainOutcome::Completed(report.stop),
    };

    ctx.notifier.notify(&domain_report.summary_line()).await;
    if let Err(e) = tracker.advance(DomainStage::Reported) {
        tracing::error!("{}", e);
    }
    domain_report.stage = tracker.stage;
    domain_report
}

/// Loads state, expands the sitemap if needed, submits and persists
///
/// Returns the submission report and the number of pending URLs left.
async fn submit_and_persist(
    ctx: &PipelineContext,
    tracker: &mut StageTracker<'_>,
    api: &dyn IndexingApi,
    store: &mut dyn LinkStore,
    sitemap_url: &str,
    limit: u32,
    settings: SubmitterSettings,
) -> Result<(SubmissionReport, usize), IndexerError> {
    let domain = tracker.domain;

    let mut indexed = normalize_links(store.load(LinkSet::Indexed)?);
    let mut failed = normalize_links(store.load(LinkSet::Failed)?);
    let mut pending = normalize_links(store.load(LinkSet::Pending)?);
    tracing::info!(
        "{}: loaded {} pending, {} indexed, {} failed links",
        domain,
        pending.len(),
        indexed.len(),
        failed.len()
    );

    // Crawl the sitemap when nothing is pending, and persist right away
    if pending.is_empty() {
        tracker.advance(DomainStage::Expanding)?;
        let expanded = ctx.expander.expand(sitemap_url).await;
        pending = unresolved(normalize_links(expanded).iter(), &indexed, &failed);
        store.save(LinkSet::Pending, pending.as_slice())?;
        tracing::info!(
            "{}: fetched {} new links from sitemap",
            domain,
            pending.len()
        );
    }

    tracker.advance(DomainStage::Submitting)?;
    let submitter = Submitter::new(api, ctx.notifier.as_ref(), settings);
    let report = submitter
        .process(
            pending.as_slice(),
            &mut indexed,
            &mut failed,
            domain,
            limit as usize,
            &mut *store,
        )
        .await;

    // Resolved URLs leave pending, unattempted ones stay for the next run
    store.save(LinkSet::Indexed, indexed.as_slice())?;
    store.save(LinkSet::Failed, failed.as_slice())?;
    let remaining = unresolved(pending.iter(), &indexed, &failed);
    store.save(LinkSet::Pending, remaining.as_slice())?;
    tracker.advance(DomainStage::Persisted)?;

    Ok((report, remaining.len()))
}

/// Keeps the URLs that are in neither resolved set
fn unresolved<'a, I>(links: I, indexed: &UrlSet, failed: &UrlSet) -> UrlSet
where
    I: Iterator<Item = &'a String>,
{
    UrlSet::from_links(
        links
            .filter(|url| !indexed.contains(url) && !failed.contains(url))
            .cloned(),
    )
}

/// Ends a domain early: one alert notification, no summary
async fn abort(
    ctx: &PipelineContext,
    tracker: &mut StageTracker<'_>,
    limit: u32,
    message: String,
) -> DomainReport {
    tracing::error!("{}", message);
    ctx.notifier.notify(&message).await;

    let stage = tracker.stage;
    if let Err(e) = tracker.advance(DomainStage::Reported) {
        tracing::error!("{}", e);
    }

    DomainReport::aborted(tracker.domain, limit, stage, message)
}
