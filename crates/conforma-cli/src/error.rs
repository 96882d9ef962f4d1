//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the conforma-core library (schema compile, depth limit)
    #[error("{0}")]
    Core(#[from] conforma_core::Error),

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Lint target directory does not exist
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Lint target is not a directory
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Invalid file format
    #[error("Invalid {} in {}: {}", expected, path.display(), detail)]
    InvalidFormat {
        path: PathBuf,
        expected: String,
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The instance did not conform; the report has already been written
    #[error("validation failed with {count} error(s)")]
    ValidationFailed { count: usize },

    /// The skill package failed lint checks; the report has already been written
    #[error("lint failed with {failures} failing check(s)")]
    LintFailed { failures: usize },

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    ///
    /// Consumers depend on a single non-zero status: 1 for soft validation
    /// failures and 1 for hard load/parse failures alike.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Whether a report for this failure has already been written, so the
    /// trailing `Error:` line must be suppressed
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed { .. } | Self::LintFailed { .. }
        )
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_exits_one() {
        let errors = [
            Error::FileNotFound {
                path: PathBuf::from("missing.json"),
            },
            Error::ValidationFailed { count: 3 },
            Error::LintFailed { failures: 1 },
            Error::config("bad config"),
        ];
        for error in errors {
            assert_eq!(error.exit_code(), 1);
        }
    }

    #[test]
    fn only_reporting_failures_are_silent() {
        assert!(Error::ValidationFailed { count: 1 }.is_reported());
        assert!(Error::LintFailed { failures: 2 }.is_reported());
        assert!(!Error::other("boom").is_reported());
    }

    #[test]
    fn format_error_uses_plain_prefix_without_color() {
        let error = Error::other("schema document must be a boolean or an object");
        assert_eq!(
            format_error(&error, false),
            "Error: schema document must be a boolean or an object"
        );
    }
}
