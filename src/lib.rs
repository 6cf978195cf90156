//! dependency-review - policy review for dependency changes
//!
//! This library classifies the dependency changes between two snapshots of a
//! repository's dependency graph against a vulnerability and license policy,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`review`): Change model, filters, license resolver and
//!   the classification pipeline
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Configuration** (`config`): YAML policy file loading and CLI overrides
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dependency_review::prelude::*;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let change_source = FileSystemReader::new(PathBuf::from("changes.json"));
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ReviewChangesUseCase::new(change_source, progress_reporter);
//!
//! // Execute
//! let policy = PolicyConfig {
//!     deny_licenses: vec!["GPL-3.0".to_string()],
//!     ..PolicyConfig::default()
//! };
//! let response = use_case.execute(ReviewRequest::new(policy)).await?;
//!
//! // Format output
//! let output = MarkdownFormatter::new().format(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod review;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::network::GitHubDependencyGraphClient;
    pub use crate::application::dto::{OutputFormat, ReviewRequest, ReviewResponse};
    pub use crate::application::use_cases::ReviewChangesUseCase;
    pub use crate::ports::outbound::{
        ChangeSource, OutputPresenter, ProgressReporter, ReviewFormatter,
    };
    pub use crate::review::domain::{
        Change, ChangeSet, ChangeType, ClassificationResult, FailOnSeverity, LicenseCategory,
        LicenseClassification, LicensePolicy, PolicyConfig, RawChange, ReviewOutcome, Scope,
        Severity, Vulnerability,
    };
    pub use crate::review::services::{
        AdvisoryFilter, ClassificationPipeline, LicenseResolver, ScopeFilter, SeverityFilter,
        SpdxExpression,
    };
    pub use crate::shared::Result;
}
