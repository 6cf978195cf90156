use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Advisory severity on the four-level ordinal scale.
///
/// Variant order defines the total order: `Low < Moderate < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            // The advisory database reports "medium" for some ecosystems
            "moderate" | "medium" => Ok(Severity::Moderate),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!(
                "Invalid severity: '{}'. Expected one of low, moderate, high, critical",
                s
            )),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One advisory affecting a dependency change.
///
/// `advisory_summary` and `advisory_url` are descriptive only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(rename = "advisory_ghsa_id", alias = "advisory_id")]
    advisory_id: String,
    severity: Severity,
    #[serde(default)]
    advisory_summary: String,
    #[serde(default)]
    advisory_url: String,
}

impl Vulnerability {
    pub fn new(
        advisory_id: String,
        severity: Severity,
        advisory_summary: String,
        advisory_url: String,
    ) -> Self {
        Self {
            advisory_id,
            severity,
            advisory_summary,
            advisory_url,
        }
    }

    pub fn advisory_id(&self) -> &str {
        &self.advisory_id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn advisory_summary(&self) -> &str {
        &self.advisory_summary
    }

    pub fn advisory_url(&self) -> &str {
        &self.advisory_url
    }
}
