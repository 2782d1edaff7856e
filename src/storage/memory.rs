//! In-memory backend
//!
//! Keeps a domain's state in process memory, for embedding the pipeline and
//! for inspecting the state a run leaves behind without touching the disk.

use crate::state::LinkSet;
use crate::storage::traits::{LinkStore, StorageResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryLinkStore {
    sets: HashMap<LinkSet, Vec<String>>,
    errors: Vec<String>,
    saves: usize,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with a pre-populated set
    pub fn with_set(mut self, set: LinkSet, links: Vec<String>) -> Self {
        self.sets.insert(set, links);
        self
    }

    /// Number of `save` calls made so far
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LinkStore for MemoryLinkStore {
    fn load(&self, set: LinkSet) -> StorageResult<Vec<String>> {
        Ok(self.sets.get(&set).cloned().unwrap_or_default())
    }

    fn save(&mut self, set: LinkSet, links: &[String]) -> StorageResult<()> {
        self.saves += 1;
        self.sets.insert(set, links.to_vec());
        Ok(())
    }

    fn append_error(&mut self, url: &str, reason: &str) -> StorageResult<()> {
        self.errors.push(format!("{}: {}", url, reason));
        Ok(())
    }

    fn load_errors(&self) -> StorageResult<Vec<String>> {
        Ok(self.errors.clone())
    }
}
