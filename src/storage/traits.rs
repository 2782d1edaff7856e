//! Storage traits and error types
//!
//! This module defines the trait interface for link-state backends and
//! associated error types.

use crate::state::LinkSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for link-state backends
///
/// One store holds the state of exactly one domain. The store does not
/// deduplicate; callers check membership before adding.
pub trait LinkStore {
    /// Loads a set in its persisted order
    ///
    /// A set that was never saved loads as an empty sequence.
    fn load(&self, set: LinkSet) -> StorageResult<Vec<String>>;

    /// Replaces the contents of a set
    fn save(&mut self, set: LinkSet, links: &[String]) -> StorageResult<()>;

    /// Appends a `url: reason` entry to the error log
    fn append_error(&mut self, url: &str, reason: &str) -> StorageResult<()>;

    /// Reads back the error log entries
    fn load_errors(&self) -> StorageResult<Vec<String>>;
}
