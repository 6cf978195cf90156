use crate::review::domain::{Change, LicenseCategory, LicenseClassification, LicensePolicy};
use crate::review::services::SpdxExpression;
use std::collections::BTreeSet;

/// LicenseResolver - sorts changes into license compliance buckets
///
/// Resolution order for one change:
/// 1. missing license -> unlicensed
/// 2. license that does not parse as an SPDX expression -> unresolved
/// 3. deny list configured -> forbidden when the expression needs a denied license
/// 4. allow list configured -> forbidden when the expression cannot be met with allowed licenses
/// 5. otherwise compliant
pub struct LicenseResolver;

impl LicenseResolver {
    /// Classifies every change; compliant changes land in no bucket
    pub fn resolve(changes: &[Change], policy: &LicensePolicy<'_>) -> LicenseClassification {
        Self::resolve_with_exemptions(changes, policy, &BTreeSet::new())
    }

    /// Same as `resolve`, but changes whose package name is in `exempt_packages`
    /// are treated as compliant without looking at their license
    pub fn resolve_with_exemptions(
        changes: &[Change],
        policy: &LicensePolicy<'_>,
        exempt_packages: &BTreeSet<String>,
    ) -> LicenseClassification {
        let mut classification = LicenseClassification::default();

        for change in changes {
            if exempt_packages.contains(change.name()) {
                continue;
            }
            if let Some(category) = Self::classify(change, policy) {
                classification.push(category, change.clone());
            }
        }

        classification
    }

    /// Category for a single change, `None` when compliant
    pub fn classify(change: &Change, policy: &LicensePolicy<'_>) -> Option<LicenseCategory> {
        let license = match change.license() {
            Some(license) => license,
            None => return Some(LicenseCategory::Unlicensed),
        };

        let expression = match SpdxExpression::parse(license) {
            Ok(expression) => expression,
            Err(_) => return Some(LicenseCategory::Unresolved),
        };

        let compliant = match policy {
            LicensePolicy::Deny(denied) => {
                expression.satisfies(&|id: &str| !denied.iter().any(|d| d == id))
            }
            LicensePolicy::Allow(allowed) => {
                expression.satisfies(&|id: &str| allowed.iter().any(|a| a == id))
            }
            LicensePolicy::Unconfigured => true,
        };

        (!compliant).then_some(LicenseCategory::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::domain::{ChangeType, Scope};

    fn change(name: &str, license: Option<&str>) -> Change {
        let change = Change::new("requirements.txt", name, "1.0", ChangeType::Added, Scope::Runtime);
        match license {
            Some(license) => change.with_license(license),
            None => change,
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn names(changes: &[Change]) -> Vec<&str> {
        changes.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_deny_list_forbids_exact_match() {
        let deny = strings(&["GPL-3.0"]);
        let changes = vec![change("copyleft", Some("GPL-3.0")), change("mit", Some("MIT"))];
        let result = LicenseResolver::resolve(&changes, &LicensePolicy::Deny(&deny));

        assert_eq!(names(&result.forbidden), vec!["copyleft"]);
        assert!(result.unresolved.is_empty());
        assert!(result.unlicensed.is_empty());
    }

    #[test]
    fn test_deny_list_is_case_sensitive() {
        let deny = strings(&["GPL-3.0"]);
        let changes = vec![change("a", Some("gpl-3.0"))];
        let result = LicenseResolver::resolve(&changes, &LicensePolicy::Deny(&deny));
        assert!(result.forbidden.is_empty());
    }

    #[test]
    fn test_allow_list_forbids_everything_else() {
        let allow = strings(&["MIT", "Apache-2.0"]);
        let changes = vec![
            change("mit", Some("MIT")),
            change("gpl", Some("GPL-2.0")),
            change("apache", Some("Apache-2.0")),
        ];
        let result = LicenseResolver::resolve(&changes, &LicensePolicy::Allow(&allow));
        assert_eq!(names(&result.forbidden), vec!["gpl"]);
    }

    #[test]
    fn test_unconfigured_never_forbids() {
        let changes = vec![change("gpl", Some("AGPL-3.0")), change("none", None)];
        let result = LicenseResolver::resolve(&changes, &LicensePolicy::Unconfigured);
        assert!(result.forbidden.is_empty());
        assert_eq!(names(&result.unlicensed), vec!["none"]);
    }

    #[test]
    fn test_missing_license_is_unlicensed_in_every_mode() {
        let deny = strings(&["GPL-3.0"]);
        let allow = strings(&["MIT"]);
        for policy in [
            LicensePolicy::Deny(&deny),
            LicensePolicy::Allow(&allow),
            LicensePolicy::Unconfigured,
        ] {
            let result = LicenseResolver::resolve(&[change("x", None)], &policy);
            assert_eq!(names(&result.unlicensed), vec!["x"]);
            assert!(result.forbidden.is_empty());
            assert!(result.unresolved.is_empty());
        }
    }

    #[test]
    fn test_unparseable_license_is_unresolved_before_matching() {
        // The raw string is in the deny list, but it is not a valid expression
        let deny = strings(&["MIT/Apache-2.0"]);
        let changes = vec![change("dual", Some("MIT/Apache-2.0"))];
        let result = LicenseResolver::resolve(&changes, &LicensePolicy::Deny(&deny));
        assert_eq!(names(&result.unresolved), vec!["dual"]);
        assert!(result.forbidden.is_empty());
    }

    #[test]
    fn test_deeply_nested_license_is_unresolved() {
        let nested = format!("{}MIT{}", "(".repeat(5000), ")".repeat(5000));
        let changes = vec![change("nested", Some(nested.as_str()))];
        let result = LicenseResolver::resolve(&changes, &LicensePolicy::Unconfigured);
        assert_eq!(names(&result.unresolved), vec!["nested"]);
        assert_eq!(
            LicenseResolver::classify(&changes[0], &LicensePolicy::Unconfigured),
            Some(LicenseCategory::Unresolved)
        );
    }

    #[test]
    fn test_compound_or_in_allow_mode() {
        let allow = strings(&["MIT"]);
        let changes = vec![
            change("dual", Some("MIT OR GPL-3.0")),
            change("both", Some("MIT AND GPL-3.0")),
        ];
        let result = LicenseResolver::resolve(&changes, &LicensePolicy::Allow(&allow));
        assert_eq!(names(&result.forbidden), vec!["both"]);
    }

    #[test]
    fn test_compound_in_deny_mode() {
        let deny = strings(&["GPL-3.0"]);
        let changes = vec![
            change("dual", Some("MIT OR GPL-3.0")),
            change("both", Some("MIT AND GPL-3.0")),
            change("only", Some("GPL-3.0 OR GPL-3.0")),
        ];
        let result = LicenseResolver::resolve(&changes, &LicensePolicy::Deny(&deny));
        assert_eq!(names(&result.forbidden), vec!["both", "only"]);
    }

    #[test]
    fn test_buckets_are_disjoint() {
        let allow = strings(&["MIT"]);
        let changes = vec![
            change("ok", Some("MIT")),
            change("bad", Some("GPL-3.0")),
            change("weird", Some("Some License v2")),
            change("missing", None),
        ];
        let result = LicenseResolver::resolve(&changes, &LicensePolicy::Allow(&allow));

        assert_eq!(names(&result.forbidden), vec!["bad"]);
        assert_eq!(names(&result.unresolved), vec!["weird"]);
        assert_eq!(names(&result.unlicensed), vec!["missing"]);
        let total = result.forbidden.len() + result.unresolved.len() + result.unlicensed.len();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_exempt_packages_are_compliant() {
        let deny = strings(&["GPL-3.0"]);
        let changes = vec![change("internal", Some("GPL-3.0")), change("other", None)];
        let exempt = BTreeSet::from(["internal".to_string(), "other".to_string()]);
        let result =
            LicenseResolver::resolve_with_exemptions(&changes, &LicensePolicy::Deny(&deny), &exempt);
        assert!(result.is_empty());
    }

    #[test]
    fn test_classify_single_change() {
        let deny = strings(&["GPL-3.0"]);
        assert_eq!(
            LicenseResolver::classify(&change("a", Some("GPL-3.0")), &LicensePolicy::Deny(&deny)),
            Some(LicenseCategory::Forbidden)
        );
        assert_eq!(
            LicenseResolver::classify(&change("a", Some("MIT")), &LicensePolicy::Deny(&deny)),
            None
        );
    }
}
