//! Indexing API boundary
//!
//! This module contains:
//! - The `IndexingApi` trait the submitter talks to
//! - The `ApiConnector` trait the orchestrator uses to build a client from a
//!   domain's credential blob
//! - The Google Indexing API implementation and its service-account auth

mod credentials;
mod google;
mod token;

pub use credentials::ServiceAccountKey;
pub use google::{GoogleConnector, GoogleIndexingClient};
pub use token::TokenProvider;

use crate::state::{QuotaStatus, SubmissionOutcome};
use crate::Result;
use async_trait::async_trait;

/// Remote service that accepts URL submissions
#[async_trait]
pub trait IndexingApi: Send + Sync {
    /// Submits one URL for (re)indexing and classifies the response
    async fn submit(&self, url: &str) -> SubmissionOutcome;

    /// Cheap call used to detect an exhausted quota before real submissions
    async fn probe_quota(&self, url: &str) -> QuotaStatus;
}

/// Builds an `IndexingApi` handle from a domain's credential blob
///
/// The blob is taken by value and must not outlive the call; implementations
/// keep only the parsed key material they need.
pub trait ApiConnector: Send + Sync {
    fn connect(&self, domain: &str, credentials: String) -> Result<Box<dyn IndexingApi>>;
}
