//! Statistics from persisted link state
//!
//! This module reads a domain's link sets and error log and prints a
//! short overview, used by `--status`.

use crate::state::LinkSet;
use crate::storage::{LinkStore, StorageResult};
use crate::url::normalize_links;

/// Link counts for one domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStatistics {
    pub pending: usize,
    pub indexed: usize,
    pub failed: usize,
    /// Entries in the error log
    pub logged_errors: usize,
}

impl LinkStatistics {
    pub fn total(&self) -> usize {
        self.pending + self.indexed + self.failed
    }
}

/// Loads statistics from a domain's store
///
/// Counts distinct, non-blank links, which is what the next run will see.
pub fn load_statistics(store: &dyn LinkStore) -> StorageResult<LinkStatistics> {
    let count = |set: LinkSet| -> StorageResult<usize> {
        Ok(normalize_links(store.load(set)?).len())
    };

    Ok(LinkStatistics {
        pending: count(LinkSet::Pending)?,
        indexed: count(LinkSet::Indexed)?,
        failed: count(LinkSet::Failed)?,
        logged_errors: store.load_errors()?.len(),
    })
}

/// Prints statistics for one domain to stdout
pub fn print_statistics(domain: &str, stats: &LinkStatistics) {
    println!("{}", domain);
    println!("  Pending: {}", stats.pending);
    println!("  Indexed: {}", stats.indexed);
    println!("  Failed:  {}", stats.failed);
    println!("  Logged errors: {}", stats.logged_errors);
    println!("  Total tracked: {}", stats.total());
}
