use crate::review::domain::{
    Change, ChangeSet, ClassificationResult, PolicyConfig, RawChange, ReviewOutcome,
};
use crate::review::services::{AdvisoryFilter, LicenseResolver, ScopeFilter, SeverityFilter};
use crate::shared::Result;

/// ClassificationPipeline - composes the filters into one classification
///
/// Stage order is fixed:
/// scope filter -> advisory allowlist -> {severity filter -> added only; license resolver}
pub struct ClassificationPipeline;

impl ClassificationPipeline {
    /// Entry point at the adapter boundary.
    ///
    /// `None` and an empty list both short-circuit to `NothingToEvaluate`.
    /// A malformed raw change aborts the whole evaluation.
    pub fn evaluate(
        policy: &PolicyConfig,
        raw_changes: Option<Vec<RawChange>>,
    ) -> Result<ReviewOutcome> {
        let raw_changes = match raw_changes {
            Some(raw_changes) if !raw_changes.is_empty() => raw_changes,
            _ => return Ok(ReviewOutcome::NothingToEvaluate),
        };

        let change_set = ChangeSet::from_raw(raw_changes)?;
        Ok(ReviewOutcome::Evaluated(Self::classify(policy, change_set)))
    }

    /// Runs both checks, even when one of them is disabled by the policy,
    /// so both summaries are always available for reporting
    pub fn classify(policy: &PolicyConfig, change_set: ChangeSet) -> ClassificationResult {
        let scoped = ScopeFilter::filter_by_scopes(&policy.fail_on_scopes, change_set.into_inner());
        let scoped = AdvisoryFilter::filter_allowed_advisories(&policy.allow_ghsas, scoped);

        let vulnerable_changes = Self::vulnerable_changes_from_scoped(policy, scoped.clone());

        let added: Vec<Change> = scoped.into_iter().filter(Change::is_added).collect();
        let licenses = LicenseResolver::resolve_with_exemptions(
            &added,
            &policy.license_policy(),
            &policy.allow_dependencies_licenses,
        );

        ClassificationResult {
            vulnerable_changes,
            licenses,
        }
    }

    /// Vulnerable-change classification on its own:
    /// scope -> advisory allowlist -> severity -> added only
    pub fn vulnerable_changes(policy: &PolicyConfig, changes: Vec<Change>) -> Vec<Change> {
        let scoped = ScopeFilter::filter_by_scopes(&policy.fail_on_scopes, changes);
        let scoped = AdvisoryFilter::filter_allowed_advisories(&policy.allow_ghsas, scoped);
        Self::vulnerable_changes_from_scoped(policy, scoped)
    }

    fn vulnerable_changes_from_scoped(policy: &PolicyConfig, scoped: Vec<Change>) -> Vec<Change> {
        let threshold = policy.fail_on_severity.effective_threshold();
        SeverityFilter::filter_by_severity(threshold, scoped)
            .into_iter()
            .filter(Change::is_added)
            .collect()
    }
}
