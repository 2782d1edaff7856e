//! Run reports
//!
//! A `DomainReport` is produced for every domain, including aborted ones, so
//! the caller can always tell what happened to each stream.

use crate::state::DomainStage;
use crate::submitter::StopReason;
use std::fmt;

/// How a domain's run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainOutcome {
    /// The submission loop ran and state was persisted
    Completed(StopReason),
    /// The domain was aborted before or during processing
    Aborted(String),
}

/// Result of one domain's run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainReport {
    pub domain: String,
    pub limit: u32,
    pub submitted: usize,
    pub failed: usize,
    /// Pending URLs left for the next run; unknown when the domain aborted
    /// before its state was loaded or persisted
    pub remaining_pending: Option<usize>,
    /// Stage the domain had reached when the report was written
    pub stage: DomainStage,
    pub outcome: DomainOutcome,
}

impl DomainReport {
    /// Report for a domain aborted at `stage`
    pub fn aborted(domain: &str, limit: u32, stage: DomainStage, reason: String) -> Self {
        Self {
            domain: domain.to_string(),
            limit,
            submitted: 0,
            failed: 0,
            remaining_pending: None,
            stage,
            outcome: DomainOutcome::Aborted(reason),
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.outcome, DomainOutcome::Aborted(_))
    }

    /// Text of the per-domain summary notification
    pub fn summary_line(&self) -> String {
        format!(
            "{} - submitted {} of {} links.",
            self.domain, self.submitted, self.limit
        )
    }
}

impl fmt::Display for DomainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            DomainOutcome::Completed(stop) => {
                write!(
                    f,
                    "{}: submitted {}/{}, failed {}",
                    self.domain, self.submitted, self.limit, self.failed
                )?;
                if let Some(pending) = self.remaining_pending {
                    write!(f, ", {} pending", pending)?;
                }
                write!(f, " ({})", stop.describe())
            }
            DomainOutcome::Aborted(reason) => write!(
                f,
                "{}: aborted at {} ({})",
                self.domain, self.stage, reason
            ),
        }
    }
}

/// Reports for every domain processed in a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<DomainReport>,
}

impl RunSummary {
    pub fn push(&mut self, report: DomainReport) {
        self.reports.push(report);
    }

    pub fn total_submitted(&self) -> usize {
        self.reports.iter().map(|r| r.submitted).sum()
    }

    pub fn aborted_domains(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|r| r.is_aborted())
            .map(|r| r.domain.as_str())
            .collect()
    }
}
