use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::config::PolicyOverrides;
use crate::review::domain::{FailOnSeverity, Scope};

/// Review dependency changes for vulnerabilities and license compliance
#[derive(Parser, Debug)]
#[command(name = "dependency-review")]
#[command(version)]
#[command(
    about = "Review dependency changes for vulnerabilities and license compliance",
    long_about = None
)]
#[command(group(ArgGroup::new("source").required(true).args(["changes", "repo"])))]
pub struct Args {
    /// JSON file with the dependency diff (dependency graph compare format)
    #[arg(long, value_name = "FILE")]
    pub changes: Option<PathBuf>,

    /// Repository to compare through the GitHub dependency graph API
    #[arg(long, value_name = "OWNER/NAME", requires_all = ["base_ref", "head_ref"])]
    pub repo: Option<String>,

    /// Base git ref of the comparison
    #[arg(long, value_name = "REF", requires = "repo")]
    pub base_ref: Option<String>,

    /// Head git ref of the comparison
    #[arg(long, value_name = "REF", requires = "repo")]
    pub head_ref: Option<String>,

    /// GitHub API base URL (for GitHub Enterprise Server)
    #[arg(long, value_name = "URL", requires = "repo")]
    pub api_url: Option<String>,

    /// Path to config file (default: auto-discover dependency-review.config.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum severity that fails the review: low, moderate, high, critical or none
    #[arg(long, value_name = "SEVERITY")]
    pub fail_on_severity: Option<FailOnSeverity>,

    /// Dependency scopes to review (comma-separated): runtime, development
    #[arg(long, value_name = "SCOPES", value_delimiter = ',')]
    pub fail_on_scopes: Option<Vec<Scope>>,

    /// Advisory IDs to ignore (comma-separated)
    #[arg(long, value_name = "IDS", value_delimiter = ',')]
    pub allow_ghsas: Option<Vec<String>>,

    /// Only allow these licenses (comma-separated SPDX identifiers)
    #[arg(long, value_name = "LICENSES", value_delimiter = ',')]
    pub allow_licenses: Option<Vec<String>>,

    /// Forbid these licenses (comma-separated SPDX identifiers)
    #[arg(long, value_name = "LICENSES", value_delimiter = ',')]
    pub deny_licenses: Option<Vec<String>>,

    /// Report findings but always exit with code 0
    #[arg(long)]
    pub warn_only: bool,

    /// Output format: markdown or json
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Policy values given on the command line
    pub fn policy_overrides(&self) -> PolicyOverrides {
        PolicyOverrides {
            fail_on_severity: self.fail_on_severity,
            fail_on_scopes: self.fail_on_scopes.clone(),
            allow_ghsas: self.allow_ghsas.clone(),
            allow_licenses: self.allow_licenses.clone(),
            deny_licenses: self.deny_licenses.clone(),
            warn_only: self.warn_only,
        }
    }
}
