use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a policy violation from
/// a run that could not be evaluated at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no policy violations, nothing to evaluate, or warn-only mode
    Success = 0,
    /// Vulnerabilities or license violations were found
    PolicyViolation = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, malformed data, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PolicyViolation => write!(f, "Policy Violation (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency review.
///
/// The only error raised by the classification core is `MalformedChange`;
/// everything else originates in the adapters around it.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Malformed change for {package} in {manifest}: unknown {field} '{value}'\n\n💡 Hint: The dependency diff must only contain change_type 'added' or 'removed'")]
    MalformedChange {
        manifest: String,
        package: String,
        field: &'static str,
        value: String,
    },

    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    InvalidConfig { message: String, hint: String },

    #[error("Change file not found: {path}\n\n💡 Hint: Pass the dependency diff with --changes <FILE> or use --repo with --base-ref/--head-ref")]
    ChangeFileNotFound { path: PathBuf },

    #[error("Failed to parse change file: {path}\nDetails: {details}\n\n💡 Hint: The file must contain a JSON array of dependency changes")]
    ChangeFileParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Dependency graph API request failed ({status}): {url}\n\n💡 Hint: {hint}")]
    ApiError {
        status: u16,
        url: String,
        hint: String,
    },
}
