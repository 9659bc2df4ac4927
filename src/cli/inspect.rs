//! Inspect command: list sublayers, their flags and bindings.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::cli::validate::load_spec;
use crate::compiler::sublayer_flag_name;
use crate::config::Config;
use crate::models::{LayerSpec, LeafAction, OutputAction};
use crate::services::LayerSpecService;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Show what a layer spec binds
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to the layer spec (defaults to paths.spec from the config)
    #[arg(short, long, value_name = "FILE")]
    pub spec: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InspectOutput {
    hyper: HyperOutput,
    sublayers: Vec<SublayerOutput>,
    direct: Vec<BindingOutput>,
}

#[derive(Debug, Serialize)]
struct HyperOutput {
    trigger_key: String,
    variable: String,
}

#[derive(Debug, Serialize)]
struct SublayerOutput {
    key: String,
    flag: String,
    bindings: Vec<BindingOutput>,
}

#[derive(Debug, Serialize)]
struct BindingOutput {
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    actions: Vec<OutputAction>,
}

impl BindingOutput {
    fn new(key: impl ToString, action: &LeafAction) -> Self {
        Self {
            key: key.to_string(),
            description: action.label().map(str::to_string),
            actions: action.effect().to_vec(),
        }
    }
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let path = LayerSpecService::resolve_path(self.spec.as_deref(), &config)
            .map_err(|e| CliError::validation(e.to_string()))?;
        let spec = load_spec(&path)?;

        let output = describe(&spec, &config);
        if self.json {
            print_json(&output)?;
        } else {
            print_human_readable(&output);
        }

        Ok(())
    }
}

fn describe(spec: &LayerSpec, config: &Config) -> InspectOutput {
    InspectOutput {
        hyper: HyperOutput {
            trigger_key: config.hyper.trigger_key.to_string(),
            variable: config.hyper.variable.clone(),
        },
        sublayers: spec
            .sublayers()
            .map(|(trigger, mapping)| SublayerOutput {
                key: trigger.to_string(),
                flag: sublayer_flag_name(trigger),
                bindings: mapping
                    .iter()
                    .map(|(key, action)| BindingOutput::new(key, action))
                    .collect(),
            })
            .collect(),
        direct: spec
            .leaves()
            .map(|(key, action)| BindingOutput::new(key, action))
            .collect(),
    }
}

fn summary(binding: &BindingOutput) -> String {
    if let Some(description) = &binding.description {
        return description.clone();
    }

    binding
        .actions
        .iter()
        .map(|action| match action {
            OutputAction::SetVariable { set_variable } => {
                format!("set {} = {}", set_variable.name, set_variable.value)
            }
            OutputAction::ShellCommand { shell_command } => shell_command.clone(),
            OutputAction::Key {
                key_code,
                modifiers,
            } if modifiers.is_empty() => key_code.to_string(),
            OutputAction::Key {
                key_code,
                modifiers,
            } => {
                let held: Vec<String> = modifiers
                    .iter()
                    .filter_map(|m| serde_json::to_value(m).ok())
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                format!("{}+{}", held.join("+"), key_code)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_human_readable(output: &InspectOutput) {
    println!(
        "Hyper key: {} (flag '{}')",
        output.hyper.trigger_key, output.hyper.variable
    );

    println!("\nSublayers ({}):", output.sublayers.len());
    for sublayer in &output.sublayers {
        println!("  {} [{}]", sublayer.key, sublayer.flag);
        if sublayer.bindings.is_empty() {
            println!("    (no bindings)");
        }
        for binding in &sublayer.bindings {
            println!("    {:<10} {}", binding.key, summary(binding));
        }
    }

    if !output.direct.is_empty() {
        println!("\nDirect bindings ({}):", output.direct.len());
        for binding in &output.direct {
            println!("  {:<12} {}", binding.key, summary(binding));
        }
    }
}
