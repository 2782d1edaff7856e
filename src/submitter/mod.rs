//! Quota-aware submission loop
//!
//! Drains a domain's pending URLs into the indexing API, moving each attempted
//! URL into the indexed or failed set.
//!
//! # Stop conditions (checked in this order)
//!
//! 1. `limit` successful submissions reached
//! 2. The API reports an exhausted quota, unavailability, or rejected
//!    credentials (directly or through a periodic quota probe)
//! 3. The pending list is exhausted

mod pacing;

pub use pacing::Pacer;

use crate::api::IndexingApi;
use crate::notify::Notifier;
use crate::state::{QuotaStatus, SubmissionOutcome, UrlSet};
use crate::storage::LinkStore;
use std::time::Duration;

/// Why the submission loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    LimitReached,
    QuotaExceeded,
    ServiceUnavailable,
    CredentialRejected(String),
    /// A periodic quota probe reported the quota as unavailable
    QuotaProbeFailed(String),
    Exhausted,
}

impl StopReason {
    /// Returns true if the run was cut short by the API rather than by the
    /// limit or by running out of URLs
    pub fn is_early_stop(&self) -> bool {
        !matches!(self, Self::LimitReached | Self::Exhausted)
    }

    pub fn describe(&self) -> String {
        match self {
            Self::LimitReached => "limit reached".to_string(),
            Self::QuotaExceeded => "quota exceeded".to_string(),
            Self::ServiceUnavailable => "service unavailable".to_string(),
            Self::CredentialRejected(reason) => format!("credentials rejected ({})", reason),
            Self::QuotaProbeFailed(reason) => format!("quota probe failed ({})", reason),
            Self::Exhausted => "no pending links left".to_string(),
        }
    }
}

/// Counters for one submission pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    /// Successful submissions in this pass
    pub submitted: usize,
    /// URLs moved to the failed set in this pass
    pub failed: usize,
    /// Pending URLs skipped because they were already resolved
    pub skipped: usize,
    pub stop: StopReason,
}

/// Submission settings for one domain
#[derive(Debug, Clone)]
pub struct SubmitterSettings {
    /// Gap enforced between consecutive API calls
    pub pacing: Duration,
    /// Re-probe the quota after this many attempts (0 disables)
    pub quota_check_interval: u32,
    /// URL passed to the quota probe
    pub probe_url: String,
}

/// Submits pending URLs for one domain
pub struct Submitter<'a> {
    api: &'a dyn IndexingApi,
    notifier: &'a dyn Notifier,
    settings: SubmitterSettings,
}

impl<'a> Submitter<'a> {
    pub fn new(
        api: &'a dyn IndexingApi,
        notifier: &'a dyn Notifier,
        settings: SubmitterSettings,
    ) -> Self {
        Self {
            api,
            notifier,
            settings,
        }
    }

    /// Runs one submission pass
    ///
    /// URLs already in `indexed` or `failed` are never resubmitted, so calling
    /// this twice over the same pending list submits nothing the second time.
    /// A URL that triggers a domain-wide stop is left out of both sets.
    ///
    /// # Arguments
    ///
    /// * `pending` - Normalized pending URLs, in submission order
    /// * `indexed` - Indexed set; successes are appended
    /// * `failed` - Failed set; per-URL failures are appended
    /// * `domain` - Domain name for logs and notifications
    /// * `limit` - Maximum successful submissions in this pass
    /// * `error_log` - Receives a `url: reason` entry per failure
    pub async fn process(
        &self,
        pending: &[String],
        indexed: &mut UrlSet,
        failed: &mut UrlSet,
        domain: &str,
        limit: usize,
        error_log: &mut dyn LinkStore,
    ) -> SubmissionReport {
        let mut pacer = Pacer::new(self.settings.pacing);
        let mut submitted = 0usize;
        let mut failed_count = 0usize;
        let mut skipped = 0usize;
        let mut since_check = 0u32;
        let mut stop = None;

        for url in pending {
            if submitted >= limit {
                stop = Some(StopReason::LimitReached);
                break;
            }

            if indexed.contains(url) || failed.contains(url) {
                skipped += 1;
                continue;
            }

            pacer.wait_turn().await;
            tracing::debug!("Submitting {}", url);
            let outcome = self.api.submit(url).await;
            let domain_wide = outcome.is_domain_wide();
            since_check += 1;

            match outcome {
                SubmissionOutcome::Success(payload) => {
                    tracing::debug!("Indexed {}: {}", url, payload);
                    indexed.insert(url.clone());
                    submitted += 1;
                }
                SubmissionOutcome::TransientFailure(reason) => {
                    tracing::warn!("Failed to index {}: {}", url, reason);
                    failed.insert(url.clone());
                    failed_count += 1;
                    if let Err(e) = error_log.append_error(url, &reason) {
                        tracing::warn!("Could not record failure for {}: {}", url, e);
                    }
                }
                SubmissionOutcome::QuotaExceeded => {
                    stop = Some(StopReason::QuotaExceeded);
                }
                SubmissionOutcome::ServiceUnavailable => {
                    stop = Some(StopReason::ServiceUnavailable);
                }
                SubmissionOutcome::CredentialError(reason) => {
                    stop = Some(StopReason::CredentialRejected(reason));
                }
            }

            if domain_wide {
                break;
            }

            let interval = self.settings.quota_check_interval;
            if interval > 0 && since_check >= interval && submitted < limit {
                since_check = 0;
                pacer.wait_turn().await;
                let status = self.api.probe_quota(&self.settings.probe_url).await;
                if let QuotaStatus::Unavailable(reason) = status {
                    stop = Some(StopReason::QuotaProbeFailed(reason));
                    break;
                }
            }
        }

        let stop = stop.unwrap_or(if submitted >= limit {
            StopReason::LimitReached
        } else {
            StopReason::Exhausted
        });

        if stop.is_early_stop() {
            let message = format!(
                "{}: {} during processing after {} submissions, stopping.",
                domain,
                stop.describe(),
                submitted
            );
            tracing::warn!("{}", message);
            self.notifier.notify(&message).await;
        }

        tracing::info!(
            "{} - submitted {} of {} links ({} failed, {} already resolved, {})",
            domain,
            submitted,
            limit,
            failed_count,
            skipped,
            stop.describe()
        );

        SubmissionReport {
            submitted,
            failed: failed_count,
            skipped,
            stop,
        }
    }
}
