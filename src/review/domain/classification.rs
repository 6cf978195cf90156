use crate::review::domain::{Change, PolicyConfig};
use serde::Serialize;
use std::fmt;

/// Non-compliant license outcome for a single change.
///
/// Compliant changes carry no category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LicenseCategory {
    Forbidden,
    Unresolved,
    Unlicensed,
}

impl fmt::Display for LicenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseCategory::Forbidden => write!(f, "forbidden"),
            LicenseCategory::Unresolved => write!(f, "unresolved"),
            LicenseCategory::Unlicensed => write!(f, "unlicensed"),
        }
    }
}

/// License buckets. Each change appears in at most one of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LicenseClassification {
    pub forbidden: Vec<Change>,
    pub unresolved: Vec<Change>,
    pub unlicensed: Vec<Change>,
}

impl LicenseClassification {
    pub fn push(&mut self, category: LicenseCategory, change: Change) {
        match category {
            LicenseCategory::Forbidden => self.forbidden.push(change),
            LicenseCategory::Unresolved => self.unresolved.push(change),
            LicenseCategory::Unlicensed => self.unlicensed.push(change),
        }
    }

    pub fn get(&self, category: LicenseCategory) -> &[Change] {
        match category {
            LicenseCategory::Forbidden => &self.forbidden,
            LicenseCategory::Unresolved => &self.unresolved,
            LicenseCategory::Unlicensed => &self.unlicensed,
        }
    }

    /// Forbidden or unresolved licenses are violations; unlicensed ones are only reported
    pub fn has_violations(&self) -> bool {
        !self.forbidden.is_empty() || !self.unresolved.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.forbidden.is_empty() && self.unresolved.is_empty() && self.unlicensed.is_empty()
    }
}

/// Output of the classification pipeline for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub vulnerable_changes: Vec<Change>,
    pub licenses: LicenseClassification,
}

impl ClassificationResult {
    pub fn vulnerability_check_failed(&self, policy: &PolicyConfig) -> bool {
        policy.vulnerability_check
            && policy.fail_on_severity.is_active()
            && !self.vulnerable_changes.is_empty()
    }

    pub fn license_check_failed(&self, policy: &PolicyConfig) -> bool {
        policy.license_check
            && policy.license_policy().is_configured()
            && self.licenses.has_violations()
    }

    /// Overall verdict. `warn_only` is deliberately not applied here.
    pub fn passed(&self, policy: &PolicyConfig) -> bool {
        !self.vulnerability_check_failed(policy) && !self.license_check_failed(policy)
    }
}

/// Terminal outcome of an evaluation run
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewOutcome {
    /// The diff source reported no changes, or an empty change list
    NothingToEvaluate,
    Evaluated(ClassificationResult),
}

impl ReviewOutcome {
    pub fn passed(&self, policy: &PolicyConfig) -> bool {
        match self {
            ReviewOutcome::NothingToEvaluate => true,
            ReviewOutcome::Evaluated(result) => result.passed(policy),
        }
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            ReviewOutcome::NothingToEvaluate => None,
            ReviewOutcome::Evaluated(result) => Some(result),
        }
    }
}
