//! Shared types for CLI commands: errors, exit codes and JSON responses.

use serde::Serialize;
use std::fmt;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was rejected (invalid spec, bad argument, validation failure)
    ValidationError = 1,
    /// Reading or writing a file failed
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error category of a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Rejected input
    Validation,
    /// File system failure
    Io,
}

/// Error returned by command handlers.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Error category, decides the exit code
    pub kind: CliErrorKind,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Creates a validation error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Creates an I/O error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationError,
            CliErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// JSON output of `validate`.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    /// True when there are no errors
    pub valid: bool,
    /// Errors and warnings, errors first
    pub errors: Vec<ValidationMessage>,
    /// Per-check status
    pub checks: ValidationChecks,
}

/// One finding in a [`ValidationResponse`].
#[derive(Debug, Serialize)]
pub struct ValidationMessage {
    /// `error` or `warning`
    pub severity: String,
    /// Human-readable message
    pub message: String,
    /// Where the finding is, if it concerns one binding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ValidationLocation>,
    /// How to fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Binding location of a finding.
#[derive(Debug, Serialize)]
pub struct ValidationLocation {
    /// Sublayer trigger key, absent for top-level entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sublayer: Option<String>,
    /// Bound key
    pub key: String,
}

/// Status of each validation check: `passed`, `warning` or `failed`.
#[derive(Debug, Serialize)]
pub struct ValidationChecks {
    /// Every binding produces output
    pub effects: String,
    /// No binding shadows the hyper key
    pub keys: String,
    /// Layer flags are distinct and untouched by bindings
    pub flags: String,
    /// Layer structure (empty sublayers, key reuse, window actions)
    pub layers: String,
}

impl ValidationChecks {
    /// All checks passed.
    #[must_use]
    pub fn all_passed() -> Self {
        Self {
            effects: "passed".to_string(),
            keys: "passed".to_string(),
            flags: "passed".to_string(),
            layers: "passed".to_string(),
        }
    }
}
