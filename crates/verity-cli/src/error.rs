//! Comprehensive error handling for the Verity CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping
//!
//! Values that fail their constraints are not errors anywhere in the
//! library. Only after the report is printed does `validate` turn "some
//! values invalid" into [`CliError::ValidationFailed`] so the process exits
//! with a distinct code.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use verity_core::domain::DomainError;
use verity_core::error::{VerityError, VerityResult};

// Re-export so callers only need `use crate::error::*`.
pub use verity_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The document to validate does not exist.
    #[error("Document not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    /// The document is not JSON of the expected shape.
    #[error("Invalid document {}: {message}", path.display())]
    InvalidDocument {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A constraint in the document cannot be built.
    #[error("Invalid constraint at '{location}': {source}")]
    InvalidDescriptor {
        location: String,
        #[source]
        source: DomainError,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `verity-core`.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's category without touching core internals.
    #[error("Validation could not run: {0}")]
    Core(#[from] VerityError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    // ── Outcome ────────────────────────────────────────────────────────────
    /// The run succeeded and found invalid values.
    #[error("{invalid} of {total} entries failed validation")]
    ValidationFailed { invalid: usize, total: usize },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::DocumentNotFound { path } => vec![
                format!("No file at '{}'", path.display()),
                "Pass '-' to read the document from standard input".into(),
            ],

            Self::InvalidDocument { .. } => vec![
                "A document is a JSON object of named entries or an array of entries".into(),
                "Each entry needs \"value\" and \"constraints\"; see: verity validate --help"
                    .into(),
            ],

            Self::InvalidDescriptor { source, .. } => source.suggestions(),

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Environment overrides use VERITY__SECTION__KEY, e.g. VERITY__OUTPUT__FORMAT=json"
                    .into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],

            Self::ValidationFailed { .. } => Vec::new(),
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::DocumentNotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidDocument { .. } => ErrorCategory::UserError,
            Self::InvalidDescriptor { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Descriptor => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::ValidationFailed { .. } => ErrorCategory::Invalid,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Invalid values|  5   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Invalid => 5,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
            ErrorCategory::Invalid => tracing::info!("{}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (bad document, bad arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
    /// Validation ran and reported invalid values.
    Invalid,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
///
/// Two concrete impls are provided:
/// - `Result<T, std::io::Error>` → `CliError::IoError`
/// - `Result<T, VerityError>`    → `CliError::Core`
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for VerityResult<T> {
    /// The context message is ignored for core errors because the core error
    /// already carries sufficient context.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use verity_core::application::EngineError;
    use verity_core::domain::{Constraint, ConstraintKind};

    fn descriptor_error() -> DomainError {
        Constraint::count_divisible_by(0).unwrap_err()
    }

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn unknown_kind_suggests_kinds_command() {
        let err = CliError::InvalidDescriptor {
            location: "email.constraints[0]".into(),
            source: "emial".parse::<ConstraintKind>().unwrap_err(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("verity kinds")));
        assert!(err.to_string().contains("email.constraints[0]"));
    }

    #[test]
    fn missing_document_suggests_stdin() {
        let err = CliError::DocumentNotFound {
            path: PathBuf::from("values.json"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("'-'")));
    }

    #[test]
    fn validation_failure_has_no_suggestions() {
        let err = CliError::ValidationFailed {
            invalid: 2,
            total: 3,
        };
        assert!(err.suggestions().is_empty());
        assert_eq!(err.to_string(), "2 of 3 entries failed validation");
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        assert_eq!(
            CliError::InvalidDescriptor {
                location: "x".into(),
                source: descriptor_error(),
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_not_found() {
        assert_eq!(
            CliError::DocumentNotFound {
                path: PathBuf::from("x")
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
        let engine: VerityError = EngineError::UnregisteredKind {
            kind: ConstraintKind::Email,
        }
        .into();
        assert_eq!(CliError::Core(engine).exit_code(), 1);
    }

    #[test]
    fn exit_code_invalid_values() {
        assert_eq!(
            CliError::ValidationFailed {
                invalid: 1,
                total: 1
            }
            .exit_code(),
            5
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::DocumentNotFound {
            path: PathBuf::from("/tmp/x.json"),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::InvalidDescriptor {
            location: "n".into(),
            source: descriptor_error(),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by:"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading document");
        assert!(matches!(cli, Err(CliError::IoError { message, .. }) if message == "reading document"));
    }

    #[test]
    fn into_cli_core_error() {
        let result: VerityResult<()> = Err(VerityError::Domain(descriptor_error()));
        let cli = result.with_cli_context(|| "ignored");
        assert!(matches!(cli, Err(CliError::Core(_))));
    }
}
