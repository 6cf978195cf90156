use crate::review::domain::{Change, Scope};
use std::collections::BTreeSet;

/// ScopeFilter - keeps changes whose dependency scope is being evaluated
pub struct ScopeFilter;

impl ScopeFilter {
    /// Retains changes whose scope is in `allowed_scopes`.
    ///
    /// An empty set evaluates every scope, `Unknown` included. Order is preserved.
    pub fn filter_by_scopes(allowed_scopes: &BTreeSet<Scope>, changes: Vec<Change>) -> Vec<Change> {
        if allowed_scopes.is_empty() {
            return changes;
        }

        changes
            .into_iter()
            .filter(|change| allowed_scopes.contains(&change.scope()))
            .collect()
    }
}
