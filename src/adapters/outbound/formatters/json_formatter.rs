use crate::application::dto::ReviewResponse;
use crate::ports::outbound::ReviewFormatter;
use crate::review::domain::{Change, LicenseClassification};
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Report<'a> {
    passed: bool,
    evaluated: bool,
    vulnerability_check_failed: bool,
    license_check_failed: bool,
    vulnerable_changes: &'a [Change],
    licenses: Licenses<'a>,
    metadata: Metadata<'a>,
}

#[derive(Debug, Serialize)]
struct Licenses<'a> {
    forbidden: &'a [Change],
    unresolved: &'a [Change],
    unlicensed: &'a [Change],
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    timestamp: &'a str,
    tool_name: &'a str,
    tool_version: &'a str,
}

impl<'a> From<&'a LicenseClassification> for Licenses<'a> {
    fn from(licenses: &'a LicenseClassification) -> Self {
        Self {
            forbidden: &licenses.forbidden,
            unresolved: &licenses.unresolved,
            unlicensed: &licenses.unlicensed,
        }
    }
}

/// JsonFormatter adapter for machine-readable review output
///
/// The change records keep the field names of the dependency graph API so
/// downstream tooling can consume them unchanged.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewFormatter for JsonFormatter {
    fn format(&self, response: &ReviewResponse) -> Result<String> {
        let empty = LicenseClassification::default();
        let (vulnerable_changes, licenses) = match response.result() {
            Some(result) => (result.vulnerable_changes.as_slice(), &result.licenses),
            None => (&[][..], &empty),
        };

        let report = Report {
            passed: response.passed,
            evaluated: response.result().is_some(),
            vulnerability_check_failed: response.vulnerability_check_failed(),
            license_check_failed: response.license_check_failed(),
            vulnerable_changes,
            licenses: licenses.into(),
            metadata: Metadata {
                timestamp: response.metadata.timestamp(),
                tool_name: response.metadata.tool_name(),
                tool_version: response.metadata.tool_version(),
            },
        };

        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}
