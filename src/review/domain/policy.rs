use crate::review::domain::{Scope, Severity};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Minimum severity that fails a run, or `None` to only report findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOnSeverity {
    Threshold(Severity),
    None,
}

impl FailOnSeverity {
    /// Severity used by the severity filter.
    ///
    /// `None` still filters (at `Low`) so findings can be reported.
    pub fn effective_threshold(&self) -> Severity {
        match self {
            FailOnSeverity::Threshold(severity) => *severity,
            FailOnSeverity::None => Severity::Low,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, FailOnSeverity::Threshold(_))
    }
}

impl Default for FailOnSeverity {
    fn default() -> Self {
        FailOnSeverity::Threshold(Severity::Low)
    }
}

impl FromStr for FailOnSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("none") {
            return Ok(FailOnSeverity::None);
        }
        s.parse::<Severity>()
            .map(FailOnSeverity::Threshold)
            .map_err(|_| {
                format!(
                    "Invalid fail_on_severity: '{}'. Expected one of low, moderate, high, critical, none",
                    s
                )
            })
    }
}

impl fmt::Display for FailOnSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailOnSeverity::Threshold(severity) => write!(f, "{}", severity),
            FailOnSeverity::None => write!(f, "none"),
        }
    }
}

/// License policy mode derived from the allow/deny lists.
///
/// A deny list wins when both lists are configured; the two are never combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicensePolicy<'a> {
    Deny(&'a [String]),
    Allow(&'a [String]),
    Unconfigured,
}

impl LicensePolicy<'_> {
    pub fn is_configured(&self) -> bool {
        !matches!(self, LicensePolicy::Unconfigured)
    }
}

/// Validated policy configuration consumed by the classification pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    pub fail_on_severity: FailOnSeverity,
    /// Scopes to evaluate; empty means every scope
    pub fail_on_scopes: BTreeSet<Scope>,
    pub allow_ghsas: BTreeSet<String>,
    pub allow_licenses: Vec<String>,
    pub deny_licenses: Vec<String>,
    /// Package names whose license is never classified
    pub allow_dependencies_licenses: BTreeSet<String>,
    pub license_check: bool,
    pub vulnerability_check: bool,
    pub warn_only: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            fail_on_severity: FailOnSeverity::default(),
            fail_on_scopes: BTreeSet::new(),
            allow_ghsas: BTreeSet::new(),
            allow_licenses: Vec::new(),
            deny_licenses: Vec::new(),
            allow_dependencies_licenses: BTreeSet::new(),
            license_check: true,
            vulnerability_check: true,
            warn_only: false,
        }
    }
}

impl PolicyConfig {
    pub fn license_policy(&self) -> LicensePolicy<'_> {
        if !self.deny_licenses.is_empty() {
            LicensePolicy::Deny(&self.deny_licenses)
        } else if !self.allow_licenses.is_empty() {
            LicensePolicy::Allow(&self.allow_licenses)
        } else {
            LicensePolicy::Unconfigured
        }
    }

    /// True when both lists are set and the allow list is therefore ignored
    pub fn has_conflicting_license_lists(&self) -> bool {
        !self.allow_licenses.is_empty() && !self.deny_licenses.is_empty()
    }
}
