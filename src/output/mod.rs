//! Output module for run reports and state statistics
//!
//! This module handles:
//! - Per-domain run reports and the text of summary notifications
//! - Aggregating reports across a run
//! - Reading per-domain link statistics for `--status`

mod report;
pub mod stats;

pub use report::{DomainOutcome, DomainReport, RunSummary};
pub use stats::{load_statistics, print_statistics, LinkStatistics};
