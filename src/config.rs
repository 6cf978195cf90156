//! Configuration file support for dependency-review.
//!
//! Provides YAML-based policy configuration through
//! `dependency-review.config.yml` files, including loading, validation and
//! merging with command-line overrides.

use anyhow::Context;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::review::domain::{FailOnSeverity, PolicyConfig, Scope};
use crate::shared::error::ReviewError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "dependency-review.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub fail_on_severity: Option<String>,
    pub fail_on_scopes: Option<Vec<String>>,
    pub allow_ghsas: Option<Vec<String>>,
    pub allow_licenses: Option<Vec<String>>,
    pub deny_licenses: Option<Vec<String>>,
    pub allow_dependencies_licenses: Option<Vec<String>>,
    pub license_check: Option<bool>,
    pub vulnerability_check: Option<bool>,
    pub warn_only: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Policy values given on the command line. `Some` wins over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    pub fail_on_severity: Option<FailOnSeverity>,
    pub fail_on_scopes: Option<Vec<Scope>>,
    pub allow_ghsas: Option<Vec<String>>,
    pub allow_licenses: Option<Vec<String>>,
    pub deny_licenses: Option<Vec<String>>,
    pub warn_only: bool,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_regular_file(path, "config file").with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file is a valid, empty configuration
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn invalid_config(message: String, hint: &str) -> anyhow::Error {
    ReviewError::InvalidConfig {
        message,
        hint: hint.to_string(),
    }
    .into()
}

fn parse_fail_on_severity(value: &str) -> Result<FailOnSeverity> {
    value
        .parse::<FailOnSeverity>()
        .map_err(|message| invalid_config(message, "Use one of: low, moderate, high, critical, none"))
}

fn parse_scopes(values: &[String]) -> Result<BTreeSet<Scope>> {
    values
        .iter()
        .map(|value| {
            value.trim().parse::<Scope>().map_err(|message| {
                invalid_config(message, "fail_on_scopes accepts 'runtime' and 'development'")
            })
        })
        .collect()
}

fn validate_entries(key: &str, values: &[String], example: &str) -> Result<()> {
    for (i, value) in values.iter().enumerate() {
        if value.trim().is_empty() {
            return Err(invalid_config(
                format!("{}[{}] must not be empty", key, i),
                &format!("Each {} entry must be a non-empty string (e.g., \"{}\")", key, example),
            ));
        }
    }
    Ok(())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref severity) = config.fail_on_severity {
        parse_fail_on_severity(severity)?;
    }
    if let Some(ref scopes) = config.fail_on_scopes {
        parse_scopes(scopes)?;
    }
    if let Some(ref ghsas) = config.allow_ghsas {
        validate_entries("allow_ghsas", ghsas, "GHSA-xxxx-xxxx-xxxx")?;
    }
    if let Some(ref licenses) = config.allow_licenses {
        validate_entries("allow_licenses", licenses, "MIT")?;
    }
    if let Some(ref licenses) = config.deny_licenses {
        validate_entries("deny_licenses", licenses, "GPL-3.0")?;
    }
    if let Some(ref packages) = config.allow_dependencies_licenses {
        validate_entries("allow_dependencies_licenses", packages, "left-pad")?;
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

fn trimmed(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.trim().to_string()).collect()
}

/// Builds the effective policy from the config file and command-line overrides.
///
/// Command-line values replace (not extend) the config file's lists.
/// `warn_only` is enabled when either source enables it.
pub fn resolve_policy(
    config: Option<ConfigFile>,
    overrides: PolicyOverrides,
) -> Result<PolicyConfig> {
    let config = config.unwrap_or_default();
    let defaults = PolicyConfig::default();

    let fail_on_severity = match (overrides.fail_on_severity, config.fail_on_severity) {
        (Some(severity), _) => severity,
        (None, Some(value)) => parse_fail_on_severity(&value)?,
        (None, None) => defaults.fail_on_severity,
    };

    let fail_on_scopes = match (overrides.fail_on_scopes, config.fail_on_scopes) {
        (Some(scopes), _) => scopes.into_iter().collect(),
        (None, Some(values)) => parse_scopes(&values)?,
        (None, None) => defaults.fail_on_scopes,
    };

    let allow_ghsas = overrides.allow_ghsas.or(config.allow_ghsas).unwrap_or_default();
    validate_entries("allow_ghsas", &allow_ghsas, "GHSA-xxxx-xxxx-xxxx")?;

    let allow_licenses = overrides
        .allow_licenses
        .or(config.allow_licenses)
        .unwrap_or_default();
    validate_entries("allow_licenses", &allow_licenses, "MIT")?;

    let deny_licenses = overrides
        .deny_licenses
        .or(config.deny_licenses)
        .unwrap_or_default();
    validate_entries("deny_licenses", &deny_licenses, "GPL-3.0")?;

    Ok(PolicyConfig {
        fail_on_severity,
        fail_on_scopes,
        allow_ghsas: trimmed(allow_ghsas).into_iter().collect(),
        allow_licenses: trimmed(allow_licenses),
        deny_licenses: trimmed(deny_licenses),
        allow_dependencies_licenses: trimmed(
            config.allow_dependencies_licenses.unwrap_or_default(),
        )
        .into_iter()
        .collect(),
        license_check: config.license_check.unwrap_or(defaults.license_check),
        vulnerability_check: config
            .vulnerability_check
            .unwrap_or(defaults.vulnerability_check),
        warn_only: overrides.warn_only || config.warn_only.unwrap_or(defaults.warn_only),
    })
}
