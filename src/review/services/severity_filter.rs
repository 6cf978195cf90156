use crate::review::domain::{Change, Severity};

/// SeverityFilter - keeps changes carrying a vulnerability at or above a threshold
pub struct SeverityFilter;

impl SeverityFilter {
    /// Retains a change iff one of its vulnerabilities has `severity >= min_severity`.
    ///
    /// Changes without vulnerabilities are always dropped. Change type is not
    /// looked at here; restricting to added dependencies is the pipeline's job.
    pub fn filter_by_severity(min_severity: Severity, changes: Vec<Change>) -> Vec<Change> {
        changes
            .into_iter()
            .filter(|change| {
                change
                    .vulnerabilities()
                    .iter()
                    .any(|vuln| vuln.severity() >= min_severity)
            })
            .collect()
    }
}
