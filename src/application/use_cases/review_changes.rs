use crate::application::dto::{ReviewMetadata, ReviewRequest, ReviewResponse};
use crate::ports::outbound::{ChangeSource, ProgressReporter};
use crate::review::domain::{ClassificationResult, PolicyConfig, RawChange, ReviewOutcome};
use crate::review::services::ClassificationPipeline;
use crate::shared::Result;

/// ReviewChangesUseCase - Core use case for reviewing a dependency diff
///
/// Fetches the change list once, runs the classification pipeline and
/// reports what it found. The use case never decides the process exit code.
///
/// # Type Parameters
/// * `CS` - ChangeSource implementation
/// * `PR` - ProgressReporter implementation
pub struct ReviewChangesUseCase<CS, PR> {
    change_source: CS,
    progress_reporter: PR,
}

impl<CS, PR> ReviewChangesUseCase<CS, PR>
where
    CS: ChangeSource,
    PR: ProgressReporter,
{
    /// Creates a new ReviewChangesUseCase with injected dependencies
    pub fn new(change_source: CS, progress_reporter: PR) -> Self {
        Self {
            change_source,
            progress_reporter,
        }
    }

    /// Executes the review
    ///
    /// # Errors
    /// Returns an error if the change source fails or delivers a malformed change
    pub async fn execute(&self, request: ReviewRequest) -> Result<ReviewResponse> {
        // Step 1: Retrieve the dependency diff
        let raw_changes = self.fetch_changes().await?;

        // Step 2: Surface policy ambiguities before evaluating
        self.warn_about_policy(&request.policy);

        // Step 3: Classify
        let outcome = ClassificationPipeline::evaluate(&request.policy, raw_changes)?;
        self.report_outcome(&outcome);

        Ok(ReviewResponse::new(
            outcome,
            request.policy,
            ReviewMetadata::generate(),
        ))
    }

    async fn fetch_changes(&self) -> Result<Option<Vec<RawChange>>> {
        self.progress_reporter.begin_task(&format!(
            "🔍 Fetching dependency changes from {}",
            self.change_source.describe()
        ));
        let fetched = self.change_source.fetch_changes().await;
        self.progress_reporter.end_task();

        let raw_changes = fetched?;
        match &raw_changes {
            None => self
                .progress_reporter
                .report("ℹ️  The change source reported no dependency changes."),
            Some(changes) => self
                .progress_reporter
                .report(&format!("✅ Detected {} dependency change(s)", changes.len())),
        }
        Ok(raw_changes)
    }

    fn warn_about_policy(&self, policy: &PolicyConfig) {
        if policy.has_conflicting_license_lists() {
            self.progress_reporter.report_error(
                "⚠️  Warning: Both allow_licenses and deny_licenses are configured. \
                 Only deny_licenses will be enforced.",
            );
        }
    }

    fn report_outcome(&self, outcome: &ReviewOutcome) {
        match outcome {
            ReviewOutcome::NothingToEvaluate => self
                .progress_reporter
                .report_completion("No dependency changes to review."),
            ReviewOutcome::Evaluated(result) => self.report_summary(result),
        }
    }

    fn report_summary(&self, result: &ClassificationResult) {
        self.progress_reporter.report(&format!(
            "   - Vulnerable changes: {}",
            result.vulnerable_changes.len()
        ));
        self.progress_reporter.report(&format!(
            "   - Forbidden licenses: {}",
            result.licenses.forbidden.len()
        ));
        self.progress_reporter.report(&format!(
            "   - Unresolved licenses: {}",
            result.licenses.unresolved.len()
        ));
        self.progress_reporter.report(&format!(
            "   - Unlicensed dependencies: {}",
            result.licenses.unlicensed.len()
        ));
        self.progress_reporter
            .report_completion("Dependency review complete.");
    }
}
