/// Mock implementations for testing
mod mock_change_source;
mod mock_progress_reporter;

pub use mock_change_source::MockChangeSource;
pub use mock_progress_reporter::MockProgressReporter;
