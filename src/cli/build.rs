//! Build command: compile a layer spec into a Karabiner profile.

use crate::cli::common::{CliError, CliResult};
use crate::cli::validate::load_spec;
use crate::compiler::{LayerValidator, RuleCompiler};
use crate::config::Config;
use crate::services::{LayerSpecService, ProfileService};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

/// Compile a layer spec into Karabiner-Elements rules
#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Path to the layer spec (defaults to paths.spec from the config)
    #[arg(short, long, value_name = "FILE")]
    pub spec: Option<PathBuf>,

    /// Karabiner configuration file to write (defaults to output.path)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Profile name (defaults to output.profile_name)
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Merge into the existing file instead of replacing it
    #[arg(long)]
    pub merge: bool,

    /// Print the document to stdout instead of writing a file
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,
}

impl BuildArgs {
    /// Execute the build command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let path = LayerSpecService::resolve_path(self.spec.as_deref(), &config)
            .map_err(|e| CliError::validation(e.to_string()))?;
        let spec = load_spec(&path)?;

        let report = LayerValidator::new(&spec, &config.hyper).validate();
        for warning in &report.warnings {
            warn!("{}", warning);
        }
        if !report.is_valid() {
            return Err(CliError::validation(format!(
                "Layer spec {} is invalid:\n{}",
                path.display(),
                report.format_message()
            )));
        }

        let rules = RuleCompiler::new(&spec, &config.hyper).compile();
        info!(
            "Compiled {} rule groups from {}",
            rules.len(),
            path.display()
        );

        let mut output = config.output.clone();
        if let Some(profile) = &self.profile {
            if profile.trim().is_empty() {
                return Err(CliError::validation("Profile name cannot be empty"));
            }
            output.profile_name.clone_from(profile);
        }
        let merge = self.merge || output.merge;
        let target = self.out.clone().unwrap_or_else(|| output.path.clone());

        if self.stdout {
            let content = ProfileService::compose(rules, &output, &target, merge)
                .map_err(|e| CliError::io(format!("{e:#}")))?;
            print!("{content}");
            return Ok(());
        }

        ProfileService::save(rules, &output, &target, merge)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        println!(
            "✓ Wrote {} sublayers to profile '{}' in {}",
            spec.sublayers().count(),
            output.profile_name,
            target.display()
        );
        Ok(())
    }
}
