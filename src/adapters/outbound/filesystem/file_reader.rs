use crate::ports::outbound::ChangeSource;
use crate::review::domain::RawChange;
use crate::shared::error::ReviewError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for reading a dependency diff from disk
///
/// The file holds the JSON array returned by the dependency graph compare
/// API. A file whose content is `null` means "no changes".
pub struct FileSystemReader {
    path: PathBuf,
}

impl FileSystemReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_changes(&self) -> Result<Option<Vec<RawChange>>> {
        if !self.path.exists() {
            return Err(ReviewError::ChangeFileNotFound {
                path: self.path.clone(),
            }
            .into());
        }

        let content =
            read_regular_file(&self.path, "change file").map_err(|e| ReviewError::FileReadError {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        serde_json::from_str::<Option<Vec<RawChange>>>(&content).map_err(|e| {
            ReviewError::ChangeFileParseError {
                path: self.path.clone(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl ChangeSource for FileSystemReader {
    async fn fetch_changes(&self) -> Result<Option<Vec<RawChange>>> {
        self.read_changes()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
