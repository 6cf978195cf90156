use crate::review::domain::PolicyConfig;

/// ReviewRequest - Internal request DTO for the review use case
///
/// The change source is injected into the use case; the request only
/// carries the already-validated policy for this run.
#[derive(Debug, Clone, Default)]
pub struct ReviewRequest {
    pub policy: PolicyConfig,
}

impl ReviewRequest {
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }
}
