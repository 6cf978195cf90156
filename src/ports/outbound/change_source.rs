use crate::review::domain::RawChange;
use crate::shared::Result;
use async_trait::async_trait;

/// ChangeSource port for retrieving the dependency diff
///
/// This port abstracts where the list of dependency changes comes from
/// (a JSON file on disk, the GitHub dependency graph API, ...).
///
/// # Async Support
/// Retrieval is performed once per run. Implementations must be `Send + Sync`.
#[async_trait]
pub trait ChangeSource: Send + Sync {
    /// Fetches the dependency changes between the two compared snapshots
    ///
    /// # Returns
    /// * `Ok(None)` - the source explicitly reported that there are no changes
    /// * `Ok(Some(changes))` - the changes in source order (may be empty)
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read or parsed
    /// - The network request fails or returns a non-success status
    async fn fetch_changes(&self) -> Result<Option<Vec<RawChange>>>;

    /// Short human readable description used in progress messages
    fn describe(&self) -> String;
}
