//! Storage module for persisting per-domain link state
//!
//! This module handles:
//! - Loading and saving the pending, indexed and failed URL sets
//! - Appending to the per-domain error log
//! - Keeping each domain's files under its own directory

mod files;
mod memory;
mod traits;

pub use files::FileLinkStore;
pub use memory::MemoryLinkStore;
pub use traits::{LinkStore, StorageError, StorageResult};

use std::path::Path;

/// Opens the file-backed store for one domain under the state root
///
/// # Arguments
///
/// * `state_dir` - Root directory shared by all domains
/// * `domain` - Domain name; becomes the subdirectory name
pub fn open_domain_store(state_dir: &Path, domain: &str) -> FileLinkStore {
    FileLinkStore::new(state_dir.join(domain))
}
