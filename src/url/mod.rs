//! URL handling module for Link-Indexer
//!
//! This module provides the normalization applied to every URL before it is
//! compared against a link set or submitted.

mod normalize;

// Re-export main functions
pub use normalize::{normalize_link, normalize_links, parse_absolute_url};
