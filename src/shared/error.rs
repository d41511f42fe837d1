use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Per-package problems (a transitive import that cannot be resolved, a
/// package without license file) never change the exit code: they are part
/// of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Scan completed and the report was written
    Success = 0,
    /// An explicitly requested package could not be resolved
    MissingPackage = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, file I/O, invalid source root, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code matching a failed run.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<LicenseBomError>() {
            Some(LicenseBomError::MissingPackage { .. }) => ExitCode::MissingPackage,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::MissingPackage => write!(f, "Missing Package (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for license scanning.
///
/// Uses thiserror to derive Display and Error traits; every variant ends with
/// a hint the user can act on.
#[derive(Debug, Error)]
pub enum LicenseBomError {
    #[error("Cannot find package: {specifier}\nReason: {reason}\n\n💡 Hint: Check the package identifier and the --root option")]
    MissingPackage { specifier: String, reason: String },

    #[error("Invalid override configuration: {path}\nDetails: {details}\n\n💡 Hint: Overrides must be a JSON array of {{\"project\": ..., \"licenses\": [{{\"type\": ..., \"confidence\": ...}}]}} objects")]
    ConfigError { path: PathBuf, details: String },

    #[error("Invalid source root: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing directory with --root")]
    InvalidSourceRoot { path: PathBuf, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns and user input
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
