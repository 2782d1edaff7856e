/// Domain pipeline stages
///
/// Every domain walks these stages in order during a run. Abort paths jump
/// straight to `Reported`.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainStage {
    Init,
    CredentialsLoaded,
    QuotaChecked,
    /// Pending set was empty and the sitemap is being expanded
    Expanding,
    Submitting,
    Persisted,
    Reported,
}

impl DomainStage {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Reported)
    }

    /// Checks if a transition from this stage to another is valid
    ///
    /// Valid transitions:
    /// - Init -> CredentialsLoaded
    /// - CredentialsLoaded -> QuotaChecked
    /// - QuotaChecked -> Expanding | Submitting
    /// - Expanding -> Submitting
    /// - Submitting -> Persisted
    /// - Persisted -> Reported
    /// - any non-terminal stage -> Reported (abort)
    pub fn can_transition_to(&self, target: Self) -> bool {
        use DomainStage::*;

        if target == Reported {
            return !self.is_terminal();
        }

        matches!(
            (self, target),
            (Init, CredentialsLoaded)
                | (CredentialsLoaded, QuotaChecked)
                | (QuotaChecked, Expanding)
                | (QuotaChecked, Submitting)
                | (Expanding, Submitting)
                | (Submitting, Persisted)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CredentialsLoaded => "credentials_loaded",
            Self::QuotaChecked => "quota_checked",
            Self::Expanding => "expanding",
            Self::Submitting => "submitting",
            Self::Persisted => "persisted",
            Self::Reported => "reported",
        }
    }
}

impl fmt::Display for DomainStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
