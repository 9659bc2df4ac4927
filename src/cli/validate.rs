//! Validation command for layer spec files.

use crate::cli::common::{
    print_json, CliError, CliResult, ValidationChecks, ValidationLocation, ValidationMessage,
    ValidationResponse,
};
use crate::compiler::validator::{ValidationErrorKind, ValidationReport};
use crate::compiler::LayerValidator;
use crate::config::Config;
use crate::models::LayerSpec;
use crate::services::LayerSpecService;
use clap::Args;
use std::path::{Path, PathBuf};

/// Validate a layer spec file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to the layer spec (defaults to paths.spec from the config)
    #[arg(short, long, value_name = "FILE")]
    pub spec: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let path = LayerSpecService::resolve_path(self.spec.as_deref(), &config)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let spec = load_spec(&path)?;
        let report = LayerValidator::new(&spec, &config.hyper).validate();
        let response = build_response(&report);

        if self.json {
            print_json(&response)?;
        } else {
            print_human_readable(&response);
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}

/// Loads a layer spec for a command.
///
/// A missing or unreadable file is an I/O error; anything else means the
/// document itself was rejected.
pub fn load_spec(path: &Path) -> CliResult<LayerSpec> {
    LayerSpecService::load(path).map_err(|error| {
        let io_failure = !path.is_file()
            || error
                .chain()
                .any(|cause| cause.downcast_ref::<std::io::Error>().is_some());
        let message = format!("{error:#}");
        if io_failure {
            CliError::io(message)
        } else {
            CliError::validation(message)
        }
    })
}

/// Converts a validation report to its JSON response.
pub fn build_response(report: &ValidationReport) -> ValidationResponse {
    let mut checks = ValidationChecks::all_passed();
    let mut messages = Vec::new();

    for error in &report.errors {
        match error.kind {
            ValidationErrorKind::EmptyEffect => checks.effects = "failed".to_string(),
            ValidationErrorKind::ReservedKey => checks.keys = "failed".to_string(),
            ValidationErrorKind::FlagCollision | ValidationErrorKind::FlagTampering => {
                checks.flags = "failed".to_string();
            }
        }

        messages.push(ValidationMessage {
            severity: "error".to_string(),
            message: error.message.clone(),
            location: error.key.map(|key| ValidationLocation {
                sublayer: error.sublayer.map(|s| s.to_string()),
                key: key.to_string(),
            }),
            suggestion: error.suggestion.clone(),
        });
    }

    if !report.warnings.is_empty() {
        checks.layers = "warning".to_string();
    }
    for warning in &report.warnings {
        messages.push(ValidationMessage {
            severity: "warning".to_string(),
            message: warning.message.clone(),
            location: None,
            suggestion: None,
        });
    }

    ValidationResponse {
        valid: report.is_valid(),
        errors: messages,
        checks,
    }
}

fn print_human_readable(response: &ValidationResponse) {
    if response.valid {
        println!("✓ Validation passed");
    } else {
        println!("✗ Validation failed");
    }

    println!("\nChecks:");
    println!("  Effects: {}", response.checks.effects);
    println!("  Keys:    {}", response.checks.keys);
    println!("  Flags:   {}", response.checks.flags);
    println!("  Layers:  {}", response.checks.layers);

    if response.errors.is_empty() {
        return;
    }

    println!("\nIssues:");
    for msg in &response.errors {
        let prefix = if msg.severity == "error" { "  ✗" } else { "  ⚠" };
        match &msg.location {
            Some(ValidationLocation {
                sublayer: Some(sublayer),
                key,
            }) => println!("{} [{} → {}] {}", prefix, sublayer, key, msg.message),
            Some(ValidationLocation { sublayer: None, key }) => {
                println!("{} [{}] {}", prefix, key, msg.message);
            }
            None => println!("{} {}", prefix, msg.message),
        }
        if let Some(suggestion) = &msg.suggestion {
            println!("      → {suggestion}");
        }
    }
}
