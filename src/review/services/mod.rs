mod advisory_filter;
mod classification_pipeline;
mod license_resolver;
mod scope_filter;
mod severity_filter;
mod spdx_expression;

pub use advisory_filter::AdvisoryFilter;
pub use classification_pipeline::ClassificationPipeline;
pub use license_resolver::LicenseResolver;
pub use scope_filter::ScopeFilter;
pub use severity_filter::SeverityFilter;
pub use spdx_expression::SpdxExpression;
