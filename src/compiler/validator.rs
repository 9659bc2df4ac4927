//! Layer spec validation before compilation.
//!
//! Compilation itself cannot fail, so everything that would produce a broken
//! or ambiguous rule set is caught here and reported as errors or warnings.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::compiler::flags::{sublayer_flag_name, SublayerFlags};
use crate::config::HyperConfig;
use crate::models::{KeyCode, LayerEntry, LayerSpec, LeafAction, OutputAction};
use regex::Regex;
use std::sync::OnceLock;

/// Findings for one layer spec.
///
/// Errors mean no rule set is emitted for the spec. Warnings describe bindings
/// that compile but probably do not behave as the author expects.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Problems that block rule compilation
    pub errors: Vec<ValidationError>,
    /// Suspicious but compilable bindings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// An empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Whether the spec may be compiled.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records a blocking problem.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records a non-blocking finding.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Renders the findings as the body of a `build` failure.
    ///
    /// Errors come first, each with its binding location, followed by the
    /// warnings that would have been logged had the build gone ahead.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!(
                "{} problem(s) prevent compiling the rules:\n",
                self.errors.len()
            ));
            for error in &self.errors {
                message.push_str(&format!("  - {error}\n"));
            }
        }

        if !self.warnings.is_empty() {
            if !message.is_empty() {
                message.push('\n');
            }
            message.push_str(&format!(
                "{} binding(s) compile but look suspicious:\n",
                self.warnings.len()
            ));
            for warning in &self.warnings {
                message.push_str(&format!("  - {warning}\n"));
            }
        }

        message
    }
}

/// A problem that blocks compilation, located at the binding that causes it.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Sublayer the offending binding lives in (None for top-level entries)
    pub sublayer: Option<KeyCode>,
    /// Offending key
    pub key: Option<KeyCode>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            sublayer: None,
            key: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the binding location.
    #[must_use]
    pub const fn at(mut self, sublayer: Option<KeyCode>, key: KeyCode) -> Self {
        self.sublayer = sublayer;
        self.key = Some(key);
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.sublayer, self.key) {
            (Some(sublayer), Some(key)) => {
                write!(f, "[{} → {}] {}: {}", sublayer, key, self.kind, self.message)?;
            }
            (None, Some(key)) => write!(f, "[{}] {}: {}", key, self.kind, self.message)?,
            _ => write!(f, "{}: {}", self.kind, self.message)?,
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A binding produces no output actions
    EmptyEffect,
    /// A top-level binding uses the hyper key itself
    ReservedKey,
    /// A sublayer flag has the same name as the hyper flag
    FlagCollision,
    /// A binding writes a flag owned by the compiler
    FlagTampering,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEffect => write!(f, "Empty Effect"),
            Self::ReservedKey => write!(f, "Reserved Key"),
            Self::FlagCollision => write!(f, "Flag Collision"),
            Self::FlagTampering => write!(f, "Flag Tampering"),
        }
    }
}

/// A binding that compiles but is likely a mistake, such as a key reused at
/// two levels or a sublayer with nothing bound in it.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// What looks wrong, naming the keys involved
    pub message: String,
}

impl ValidationWarning {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn rectangle_action_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^open -g rectangle://execute-action\?name=(.*)$")
            .unwrap_or_else(|e| unreachable!("static regex is valid: {e}"))
    })
}

fn rectangle_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z0-9-]+$").unwrap_or_else(|e| unreachable!("static regex is valid: {e}"))
    })
}

/// Layer spec validator.
pub struct LayerValidator<'a> {
    spec: &'a LayerSpec,
    hyper: &'a HyperConfig,
}

impl<'a> LayerValidator<'a> {
    /// Creates a new layer validator.
    #[must_use]
    pub const fn new(spec: &'a LayerSpec, hyper: &'a HyperConfig) -> Self {
        Self { spec, hyper }
    }

    /// Validates the spec for compilation.
    ///
    /// Checks:
    /// - Every binding emits at least one action
    /// - The hyper key is not bound at the top level
    /// - No sublayer flag shadows the hyper flag
    /// - No binding writes the hyper flag or a sublayer flag
    /// - Empty sublayers, keys reused across levels and odd window action
    ///   names are reported as warnings
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        let flags = SublayerFlags::from_spec(self.spec);

        for (key, entry) in self.spec.iter() {
            if key == self.hyper.trigger_key {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::ReservedKey,
                        format!("'{}' is the hyper key and cannot be bound under it", key),
                    )
                    .at(None, key)
                    .with_suggestion("Pick another key or change hyper.trigger_key"),
                );
            }

            if let LayerEntry::Leaf(action) = entry {
                self.validate_leaf(&mut report, &flags, None, key, action);
            }
        }

        for (trigger, mapping) in self.spec.sublayers() {
            if sublayer_flag_name(trigger) == self.hyper.variable {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::FlagCollision,
                        format!(
                            "Sublayer flag '{}' has the same name as the hyper flag",
                            self.hyper.variable
                        ),
                    )
                    .at(None, trigger)
                    .with_suggestion("Rename hyper.variable"),
                );
            }

            if mapping.is_empty() {
                report.add_warning(ValidationWarning::new(format!(
                    "Sublayer '{}' has no bindings; holding it only blocks other sublayers",
                    trigger
                )));
            }

            for (key, action) in mapping.iter() {
                self.validate_leaf(&mut report, &flags, Some(trigger), key, action);
                self.check_cross_level_reuse(&mut report, trigger, key);
            }
        }

        report
    }

    /// Validates one binding's effect.
    fn validate_leaf(
        &self,
        report: &mut ValidationReport,
        flags: &SublayerFlags,
        sublayer: Option<KeyCode>,
        key: KeyCode,
        action: &LeafAction,
    ) {
        if action.effect().is_empty() {
            report.add_error(
                ValidationError::new(ValidationErrorKind::EmptyEffect, "Binding has no actions")
                    .at(sublayer, key)
                    .with_suggestion("Add at least one action or remove the binding"),
            );
        }

        for output in action.effect() {
            match output {
                OutputAction::SetVariable { set_variable } => {
                    let name = set_variable.name.as_str();
                    if name == self.hyper.variable || flags.contains(name) {
                        report.add_error(
                            ValidationError::new(
                                ValidationErrorKind::FlagTampering,
                                format!("Binding sets '{}', which is managed by the layer rules", name),
                            )
                            .at(sublayer, key),
                        );
                    }
                }
                OutputAction::ShellCommand { shell_command } => {
                    let Some(captures) = rectangle_action_pattern().captures(shell_command) else {
                        continue;
                    };
                    let name = &captures[1];
                    if !rectangle_name_pattern().is_match(name) {
                        report.add_warning(ValidationWarning::new(format!(
                            "{}: window action '{}' does not look like a Rectangle action name",
                            location(sublayer, key),
                            name
                        )));
                    }
                }
                OutputAction::Key { .. } => {}
            }
        }
    }

    /// Flags keys that are meaningful at more than one level.
    fn check_cross_level_reuse(&self, report: &mut ValidationReport, trigger: KeyCode, key: KeyCode) {
        match self.spec.get(key) {
            Some(LayerEntry::Leaf(_)) => {
                report.add_warning(ValidationWarning::new(format!(
                    "'{}' is a direct hyper binding and is also bound in sublayer '{}'; \
                     while '{}' is held both rules match",
                    key, trigger, trigger
                )));
            }
            Some(LayerEntry::Sublayer(_)) if key != trigger => {
                report.add_warning(ValidationWarning::new(format!(
                    "'{}' opens a sublayer and is also bound in sublayer '{}'; \
                     inside '{}' the binding wins",
                    key, trigger, trigger
                )));
            }
            _ => {}
        }
    }
}

fn location(sublayer: Option<KeyCode>, key: KeyCode) -> String {
    match sublayer {
        Some(sublayer) => format!("{} → {}", sublayer, key),
        None => key.to_string(),
    }
}
