use crate::review::domain::{ClassificationResult, PolicyConfig, ReviewOutcome};
use chrono::Utc;

/// Tool and timing information attached to every report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
}

impl ReviewMetadata {
    pub fn new(timestamp: String, tool_name: String, tool_version: String) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
        }
    }

    /// Metadata for the current run, stamped with the current UTC time
    pub fn generate() -> Self {
        Self::new(
            Utc::now().to_rfc3339(),
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }
}

/// ReviewResponse - Internal response DTO from the review use case
///
/// Formatters fold this into their presentation; the verdict itself is
/// computed once, here, from the classification and the policy.
#[derive(Debug, Clone)]
pub struct ReviewResponse {
    pub outcome: ReviewOutcome,
    /// Policy the run was evaluated against
    pub policy: PolicyConfig,
    pub metadata: ReviewMetadata,
    /// Overall verdict, not taking `warn_only` into account
    pub passed: bool,
}

impl ReviewResponse {
    pub fn new(outcome: ReviewOutcome, policy: PolicyConfig, metadata: ReviewMetadata) -> Self {
        let passed = outcome.passed(&policy);
        Self {
            outcome,
            policy,
            metadata,
            passed,
        }
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.outcome.result()
    }

    pub fn vulnerability_check_failed(&self) -> bool {
        self.result()
            .is_some_and(|r| r.vulnerability_check_failed(&self.policy))
    }

    pub fn license_check_failed(&self) -> bool {
        self.result()
            .is_some_and(|r| r.license_check_failed(&self.policy))
    }
}
