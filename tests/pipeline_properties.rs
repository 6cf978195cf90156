//! Property-based tests for the classification pipeline.
//!
//! These tests use proptest to verify invariants around:
//! - Severity threshold monotonicity
//! - Advisory allowlist identity and idempotence
//! - Removed changes never being reported as vulnerable
//! - License buckets being disjoint and order preserving

use dependency_review::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn arb_scope() -> impl Strategy<Value = Scope> {
    prop_oneof![
        Just(Scope::Runtime),
        Just(Scope::Development),
        Just(Scope::Unknown)
    ]
}

fn arb_change_type() -> impl Strategy<Value = ChangeType> {
    prop_oneof![Just(ChangeType::Added), Just(ChangeType::Removed)]
}

/// Advisory IDs drawn from a small pool so allowlists actually hit.
fn arb_advisory_id() -> impl Strategy<Value = String> {
    (0u8..8).prop_map(|n| format!("GHSA-{:04}-test-pool", n))
}

fn arb_vulnerability() -> impl Strategy<Value = Vulnerability> {
    (arb_advisory_id(), arb_severity()).prop_map(|(id, severity)| {
        Vulnerability::new(id, severity, String::new(), String::new())
    })
}

/// License strings covering every resolver outcome.
fn arb_license() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("MIT".to_string())),
        Just(Some("Apache-2.0".to_string())),
        Just(Some("GPL-3.0".to_string())),
        Just(Some("MIT OR GPL-3.0".to_string())),
        Just(Some("MIT AND GPL-3.0".to_string())),
        Just(Some("(Apache-2.0 OR MIT) AND BSD-3-Clause".to_string())),
        Just(Some("not a license (".to_string())),
    ]
}

fn arb_change() -> impl Strategy<Value = Change> {
    (
        "[a-z][a-z0-9-]{0,15}",
        arb_change_type(),
        arb_scope(),
        arb_license(),
        prop::collection::vec(arb_vulnerability(), 0..4),
    )
        .prop_map(|(name, change_type, scope, license, vulnerabilities)| {
            let change = Change::new("manifest.lock", name, "1.0.0", change_type, scope)
                .with_vulnerabilities(vulnerabilities);
            match license {
                Some(license) => change.with_license(license),
                None => change,
            }
        })
}

fn arb_changes() -> impl Strategy<Value = Vec<Change>> {
    prop::collection::vec(arb_change(), 0..24)
}

fn arb_allowlist() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(arb_advisory_id(), 0..4)
}

fn arb_license_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["MIT", "Apache-2.0", "GPL-3.0", "BSD-3-Clause"]),
        0..3,
    )
    .prop_map(|ids| ids.into_iter().map(String::from).collect())
}

fn policy(threshold: Severity, allow_ghsas: BTreeSet<String>) -> PolicyConfig {
    PolicyConfig {
        fail_on_severity: FailOnSeverity::Threshold(threshold),
        allow_ghsas,
        ..PolicyConfig::default()
    }
}

fn keys(changes: &[Change]) -> Vec<(String, Vec<String>)> {
    changes
        .iter()
        .map(|c| {
            (
                c.name().to_string(),
                c.vulnerabilities()
                    .iter()
                    .map(|v| v.advisory_id().to_string())
                    .collect(),
            )
        })
        .collect()
}

/// True when `sub` appears in `full` in the same relative order.
fn is_ordered_subsequence(sub: &[Change], full: &[Change]) -> bool {
    let mut remaining = full.iter();
    sub.iter().all(|s| remaining.any(|f| f.name() == s.name()))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn raising_threshold_never_adds_findings(
        changes in arb_changes(),
        a in arb_severity(),
        b in arb_severity(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let at_low = ClassificationPipeline::vulnerable_changes(&policy(low, BTreeSet::new()), changes.clone());
        let at_high = ClassificationPipeline::vulnerable_changes(&policy(high, BTreeSet::new()), changes);

        prop_assert!(at_high.len() <= at_low.len());
        prop_assert!(is_ordered_subsequence(&at_high, &at_low));
    }

    #[test]
    fn empty_allowlist_is_identity(changes in arb_changes()) {
        let filtered = AdvisoryFilter::filter_allowed_advisories(&BTreeSet::new(), changes.clone());
        prop_assert_eq!(filtered, changes);
    }

    #[test]
    fn allowlist_filter_is_idempotent(changes in arb_changes(), allowlist in arb_allowlist()) {
        let once = AdvisoryFilter::filter_allowed_advisories(&allowlist, changes);
        let twice = AdvisoryFilter::filter_allowed_advisories(&allowlist, once.clone());
        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(keys(&once), keys(&twice));
    }

    #[test]
    fn allowlisted_advisories_never_reported(
        changes in arb_changes(),
        allowlist in arb_allowlist(),
        threshold in arb_severity(),
    ) {
        let vulnerable = ClassificationPipeline::vulnerable_changes(&policy(threshold, allowlist.clone()), changes);
        for change in &vulnerable {
            prop_assert!(change.has_vulnerabilities());
            for vulnerability in change.vulnerabilities() {
                prop_assert!(!allowlist.contains(vulnerability.advisory_id()));
            }
        }
    }

    #[test]
    fn removed_changes_never_vulnerable(
        changes in arb_changes(),
        threshold in arb_severity(),
    ) {
        let vulnerable = ClassificationPipeline::vulnerable_changes(&policy(threshold, BTreeSet::new()), changes);
        prop_assert!(vulnerable.iter().all(Change::is_added));
    }

    #[test]
    fn vulnerable_changes_is_idempotent(
        changes in arb_changes(),
        allowlist in arb_allowlist(),
        threshold in arb_severity(),
    ) {
        let policy = policy(threshold, allowlist);
        let once = ClassificationPipeline::vulnerable_changes(&policy, changes);
        let twice = ClassificationPipeline::vulnerable_changes(&policy, once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn license_buckets_are_disjoint_and_ordered(
        changes in arb_changes(),
        allow in arb_license_list(),
        deny in arb_license_list(),
    ) {
        let policy = PolicyConfig {
            allow_licenses: allow,
            deny_licenses: deny,
            ..PolicyConfig::default()
        };
        let licenses = LicenseResolver::resolve(&changes, &policy.license_policy());

        let total = licenses.forbidden.len() + licenses.unresolved.len() + licenses.unlicensed.len();
        prop_assert!(total <= changes.len());
        for bucket in [&licenses.forbidden, &licenses.unresolved, &licenses.unlicensed] {
            prop_assert!(is_ordered_subsequence(bucket, &changes));
        }

        // Every input change lands in at most one bucket
        for (index, change) in changes.iter().enumerate() {
            let category = LicenseResolver::classify(change, &policy.license_policy());
            let expected = changes[..index]
                .iter()
                .filter(|c| LicenseResolver::classify(c, &policy.license_policy()) == category)
                .count();
            if let Some(category) = category {
                prop_assert_eq!(&licenses.get(category)[expected], change);
            }
        }
    }

    #[test]
    fn unconfigured_policy_never_forbids(changes in arb_changes()) {
        let licenses = LicenseResolver::resolve(&changes, &LicensePolicy::Unconfigured);
        prop_assert!(licenses.forbidden.is_empty());
    }

    #[test]
    fn scope_filter_keeps_only_selected_scopes(changes in arb_changes(), scope in arb_scope()) {
        let selected = BTreeSet::from([scope]);
        let filtered = ScopeFilter::filter_by_scopes(&selected, changes.clone());
        prop_assert!(filtered.iter().all(|c| c.scope() == scope));
        prop_assert_eq!(
            filtered.len(),
            changes.iter().filter(|c| c.scope() == scope).count()
        );
    }

    #[test]
    fn severity_none_never_fails_vulnerability_check(changes in arb_changes()) {
        let policy = PolicyConfig {
            fail_on_severity: FailOnSeverity::None,
            ..PolicyConfig::default()
        };
        let result = ClassificationPipeline::classify(&policy, ChangeSet::new(changes));
        prop_assert!(!result.vulnerability_check_failed(&policy));
    }
}
