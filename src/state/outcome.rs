//! Classified responses of the indexing API

use serde_json::Value;

/// Result of submitting one URL
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The API accepted the URL; carries the response payload
    Success(Value),

    /// This URL failed; the run continues with the next one
    TransientFailure(String),

    /// The domain's daily quota is spent
    QuotaExceeded,

    /// The API is temporarily unavailable
    ServiceUnavailable,

    /// The API rejected the domain's credentials
    CredentialError(String),
}

impl SubmissionOutcome {
    /// Returns true if this outcome stops the rest of the domain's run
    ///
    /// These describe the whole domain, not the URL that triggered them, so
    /// the URL stays pending.
    pub fn is_domain_wide(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded | Self::ServiceUnavailable | Self::CredentialError(_)
        )
    }
}

/// Result of a quota probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaStatus {
    Available,
    Unavailable(String),
}
