use crate::review::domain::Change;
use std::collections::BTreeSet;

/// AdvisoryFilter - drops explicitly allowed advisories from each change
pub struct AdvisoryFilter;

impl AdvisoryFilter {
    /// Removes every vulnerability whose advisory id is in `allowed_ids`.
    ///
    /// Changes are never dropped here, even when their vulnerability list
    /// becomes empty; license data still has to reach the license resolver.
    pub fn filter_allowed_advisories(
        allowed_ids: &BTreeSet<String>,
        changes: Vec<Change>,
    ) -> Vec<Change> {
        if allowed_ids.is_empty() {
            return changes;
        }

        changes
            .into_iter()
            .map(|change| {
                let remaining = change
                    .vulnerabilities()
                    .iter()
                    .filter(|vuln| !allowed_ids.contains(vuln.advisory_id()))
                    .cloned()
                    .collect();
                change.with_vulnerabilities(remaining)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::domain::{ChangeType, Scope, Severity, Vulnerability};

    fn vuln(id: &str, severity: Severity) -> Vulnerability {
        Vulnerability::new(
            id.to_string(),
            severity,
            format!("Advisory {}", id),
            format!("https://github.com/advisories/{}", id),
        )
    }

    fn change(name: &str, vulns: Vec<Vulnerability>) -> Change {
        Change::new("package.json", name, "1.0.0", ChangeType::Added, Scope::Runtime)
            .with_license("MIT")
            .with_vulnerabilities(vulns)
    }

    #[test]
    fn test_empty_allowlist_is_identity() {
        let changes = vec![
            change("a", vec![vuln("GHSA-1", Severity::High)]),
            change("b", vec![]),
        ];
        let result = AdvisoryFilter::filter_allowed_advisories(&BTreeSet::new(), changes.clone());
        assert_eq!(result, changes);
    }

    #[test]
    fn test_removes_only_allowed_advisories() {
        let changes = vec![change(
            "a",
            vec![vuln("GHSA-1", Severity::High), vuln("GHSA-2", Severity::Low)],
        )];
        let allowed = BTreeSet::from(["GHSA-1".to_string()]);
        let result = AdvisoryFilter::filter_allowed_advisories(&allowed, changes);

        assert_eq!(result.len(), 1);
        let ids: Vec<&str> = result[0]
            .vulnerabilities()
            .iter()
            .map(|v| v.advisory_id())
            .collect();
        assert_eq!(ids, vec!["GHSA-2"]);
    }

    #[test]
    fn test_change_with_all_advisories_allowed_is_kept() {
        let changes = vec![change("a", vec![vuln("GHSA-x", Severity::Critical)])];
        let allowed = BTreeSet::from(["GHSA-x".to_string()]);
        let result = AdvisoryFilter::filter_allowed_advisories(&allowed, changes);

        assert_eq!(result.len(), 1);
        assert!(!result[0].has_vulnerabilities());
        assert_eq!(result[0].license(), Some("MIT"));
    }

    #[test]
    fn test_advisory_ids_match_exactly() {
        let changes = vec![change("a", vec![vuln("GHSA-abcd", Severity::High)])];
        let allowed = BTreeSet::from(["ghsa-abcd".to_string()]);
        let result = AdvisoryFilter::filter_allowed_advisories(&allowed, changes);
        assert_eq!(result[0].vulnerabilities().len(), 1);
    }
}
