//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::KeyCode;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Key that acts as the hyper key (Karabiner key name)
    #[arg(long, value_name = "KEY")]
    trigger_key: Option<String>,

    /// Name of the hyper flag variable
    #[arg(long, value_name = "NAME")]
    variable: Option<String>,

    /// Key sent when the hyper key is tapped alone
    #[arg(long, value_name = "KEY")]
    alone_key: Option<String>,

    /// Send the alone key when the hyper key is tapped alone
    #[arg(long, conflicts_with = "no_tap_alone")]
    tap_alone: bool,

    /// Send nothing when the hyper key is tapped alone
    #[arg(long)]
    no_tap_alone: bool,

    /// Karabiner configuration file to write
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Profile name to write rules into
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Merge into the existing Karabiner file by default (true or false)
    #[arg(long, value_name = "BOOL")]
    merge: Option<bool>,

    /// Show Karabiner's menu bar icon (true or false)
    #[arg(long, value_name = "BOOL")]
    show_in_menu_bar: Option<bool>,

    /// Default layer spec file
    #[arg(long, value_name = "FILE")]
    spec: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    const fn is_empty(&self) -> bool {
        self.trigger_key.is_none()
            && self.variable.is_none()
            && self.alone_key.is_none()
            && !self.tap_alone
            && !self.no_tap_alone
            && self.output.is_none()
            && self.profile.is_none()
            && self.merge.is_none()
            && self.show_in_menu_bar.is_none()
            && self.spec.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified, see `config set --help`",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(name) = &self.trigger_key {
            config.hyper.trigger_key = parse_key(name)?;
        }
        if let Some(variable) = &self.variable {
            config.hyper.variable.clone_from(variable);
        }
        if let Some(name) = &self.alone_key {
            config.hyper.alone_key = parse_key(name)?;
        }
        if self.tap_alone {
            config.hyper.tap_alone = true;
        }
        if self.no_tap_alone {
            config.hyper.tap_alone = false;
        }

        if let Some(path) = &self.output {
            config.output.path.clone_from(path);
        }
        if let Some(profile) = &self.profile {
            config.output.profile_name.clone_from(profile);
        }
        if let Some(merge) = self.merge {
            config.output.merge = merge;
        }
        if let Some(show) = self.show_in_menu_bar {
            config.output.show_in_menu_bar = show;
        }

        if let Some(path) = &self.spec {
            if !path.is_file() {
                return Err(CliError::validation(format!(
                    "Layer spec does not exist: {}",
                    path.display()
                )));
            }
            config.paths.spec = Some(path.clone());
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn parse_key(name: &str) -> CliResult<KeyCode> {
    name.parse()
        .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("HyperLayers Configuration");
    println!("=========================");
    println!();

    if let Ok(path) = Config::config_file_path() {
        if Config::exists() {
            println!("File: {}", path.display());
        } else {
            println!("File: {} (not saved yet, using defaults)", path.display());
        }
        println!();
    }

    println!("Hyper:");
    println!("  Trigger Key: {}", config.hyper.trigger_key);
    println!("  Variable:    {}", config.hyper.variable);
    if config.hyper.tap_alone {
        println!("  Tap Alone:   {}", config.hyper.alone_key);
    } else {
        println!("  Tap Alone:   (disabled)");
    }
    println!();

    println!("Output:");
    println!("  Path:             {}", config.output.path.display());
    println!("  Profile:          {}", config.output.profile_name);
    println!("  Merge:            {}", config.output.merge);
    println!("  Show In Menu Bar: {}", config.output.show_in_menu_bar);
    println!();

    println!("Paths:");
    if let Some(spec) = &config.paths.spec {
        println!("  Layer Spec: {}", spec.display());
    } else {
        println!("  Layer Spec: (not configured)");
    }
    println!();
}
