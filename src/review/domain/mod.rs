pub mod change;
pub mod classification;
pub mod policy;
pub mod vulnerability;

pub use change::{Change, ChangeSet, ChangeType, RawChange, Scope};
pub use classification::{
    ClassificationResult, LicenseCategory, LicenseClassification, ReviewOutcome,
};
pub use policy::{FailOnSeverity, LicensePolicy, PolicyConfig};
pub use vulnerability::{Severity, Vulnerability};
