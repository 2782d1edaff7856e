//! State module for tracking URL disposition
//!
//! # Components
//!
//! - `LinkSet`: names the three disjoint URL sets kept per domain (pending, indexed, failed)
//! - `UrlSet`: an insertion-ordered set of URLs with O(1) membership tests
//! - `SubmissionOutcome` / `QuotaStatus`: classified responses of the indexing API
//! - `DomainStage`: the per-domain pipeline state machine

mod domain_stage;
mod link_set;
mod outcome;

// Re-export main types
pub use domain_stage::DomainStage;
pub use link_set::{LinkSet, UrlSet};
pub use outcome::{QuotaStatus, SubmissionOutcome};
