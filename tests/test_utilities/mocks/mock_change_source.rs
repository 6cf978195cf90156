use async_trait::async_trait;
use dependency_review::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock ChangeSource returning a canned dependency diff
///
/// Clones share the fetch counter.
#[derive(Clone)]
pub struct MockChangeSource {
    changes: Option<Vec<RawChange>>,
    failure: Option<String>,
    fetch_count: Arc<AtomicUsize>,
}

impl MockChangeSource {
    pub fn new(changes: Vec<RawChange>) -> Self {
        Self {
            changes: Some(changes),
            failure: None,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Source that reports "no changes" (`null` on the wire)
    pub fn no_changes() -> Self {
        Self {
            changes: None,
            failure: None,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            changes: None,
            failure: Some(message.to_string()),
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChangeSource for MockChangeSource {
    async fn fetch_changes(&self) -> Result<Option<Vec<RawChange>>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }
        Ok(self.changes.clone())
    }

    fn describe(&self) -> String {
        "mock change source".to_string()
    }
}
