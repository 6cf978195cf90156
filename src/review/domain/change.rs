use crate::review::domain::Vulnerability;
use crate::shared::error::ReviewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a dependency change between two graph snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Removed,
}

impl FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "added" => Ok(ChangeType::Added),
            "removed" => Ok(ChangeType::Removed),
            _ => Err(format!("Invalid change type: '{}'", s)),
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeType::Added => write!(f, "added"),
            ChangeType::Removed => write!(f, "removed"),
        }
    }
}

/// Whether a dependency is needed at runtime or only during development
///
/// `Unknown` covers diff entries whose scope the source could not determine.
/// It is never selectable on the command line or in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Runtime,
    Development,
    Unknown,
}

impl Scope {
    /// Maps a scope as reported by the diff source. Missing, `unknown` and
    /// unrecognized values all become `Unknown`.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "runtime" => Scope::Runtime,
            "development" => Scope::Development,
            _ => Scope::Unknown,
        }
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "runtime" => Ok(Scope::Runtime),
            "development" => Ok(Scope::Development),
            _ => Err(format!(
                "Invalid scope: '{}'. Expected 'runtime' or 'development'",
                s
            )),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Runtime => write!(f, "runtime"),
            Scope::Development => write!(f, "development"),
            Scope::Unknown => write!(f, "unknown"),
        }
    }
}

/// Wire record for one dependency change, as delivered by the diff source.
///
/// `change_type` is kept as a string so an unknown value can be reported as a
/// malformed change instead of a generic parse failure. `scope` may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChange {
    pub change_type: String,
    pub manifest: String,
    #[serde(default)]
    pub ecosystem: Option<String>,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub package_url: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub source_repository_url: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
}

/// One dependency's state transition between two graph snapshots
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    manifest: String,
    name: String,
    version: String,
    change_type: ChangeType,
    scope: Scope,
    license: Option<String>,
    vulnerabilities: Vec<Vulnerability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ecosystem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_repository_url: Option<String>,
}

impl Change {
    pub fn new(
        manifest: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        change_type: ChangeType,
        scope: Scope,
    ) -> Self {
        Self {
            manifest: manifest.into(),
            name: name.into(),
            version: version.into(),
            change_type,
            scope,
            license: None,
            vulnerabilities: Vec::new(),
            ecosystem: None,
            package_url: None,
            source_repository_url: None,
        }
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Replaces the vulnerability list, keeping every other field
    pub fn with_vulnerabilities(mut self, vulnerabilities: Vec<Vulnerability>) -> Self {
        self.vulnerabilities = vulnerabilities;
        self
    }

    pub fn with_ecosystem(mut self, ecosystem: impl Into<String>) -> Self {
        self.ecosystem = Some(ecosystem.into());
        self
    }

    pub fn manifest(&self) -> &str {
        &self.manifest
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// License expression, or `None` when the dependency is unlicensed.
    /// Blank strings are reported as `None`.
    pub fn license(&self) -> Option<&str> {
        self.license
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    pub fn ecosystem(&self) -> Option<&str> {
        self.ecosystem.as_deref()
    }

    pub fn package_url(&self) -> Option<&str> {
        self.package_url.as_deref()
    }

    pub fn source_repository_url(&self) -> Option<&str> {
        self.source_repository_url.as_deref()
    }

    pub fn is_added(&self) -> bool {
        self.change_type == ChangeType::Added
    }

    pub fn has_vulnerabilities(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }
}

impl TryFrom<RawChange> for Change {
    type Error = ReviewError;

    fn try_from(raw: RawChange) -> Result<Self, Self::Error> {
        let change_type =
            raw.change_type
                .parse::<ChangeType>()
                .map_err(|_| ReviewError::MalformedChange {
                    manifest: raw.manifest.clone(),
                    package: raw.name.clone(),
                    field: "change_type",
                    value: raw.change_type.clone(),
                })?;

        let scope = Scope::from_wire(&raw.scope);

        Ok(Self {
            manifest: raw.manifest,
            name: raw.name,
            version: raw.version,
            change_type,
            scope,
            license: raw.license,
            vulnerabilities: raw.vulnerabilities,
            ecosystem: raw.ecosystem,
            package_url: raw.package_url,
            source_repository_url: raw.source_repository_url,
        })
    }
}

/// Ordered sequence of changes for one evaluation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet(Vec<Change>);

impl ChangeSet {
    pub fn new(changes: Vec<Change>) -> Self {
        Self(changes)
    }

    /// Validates every raw change, failing on the first malformed one
    pub fn from_raw(raw_changes: Vec<RawChange>) -> Result<Self, ReviewError> {
        raw_changes
            .into_iter()
            .map(Change::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Change] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Change> {
        self.0
    }
}
