//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{CONFIG_DIR_ENV, DEFAULT_HYPER_VARIABLE, SUBLAYER_FLAG_PREFIX};
use crate::models::KeyCode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global modifier ("hyper key") settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperConfig {
    /// Physical key that acts as the hyper key
    #[serde(default = "default_trigger_key")]
    pub trigger_key: KeyCode,
    /// Name of the global modifier flag variable
    #[serde(default = "default_variable")]
    pub variable: String,
    /// Key emitted when the hyper key is tapped alone
    #[serde(default = "default_alone_key")]
    pub alone_key: KeyCode,
    /// Whether tapping the hyper key alone emits `alone_key`
    #[serde(default = "default_tap_alone")]
    pub tap_alone: bool,
}

const fn default_trigger_key() -> KeyCode {
    KeyCode::CapsLock
}

fn default_variable() -> String {
    DEFAULT_HYPER_VARIABLE.to_string()
}

const fn default_alone_key() -> KeyCode {
    KeyCode::Escape
}

const fn default_tap_alone() -> bool {
    true
}

impl Default for HyperConfig {
    fn default() -> Self {
        Self {
            trigger_key: default_trigger_key(),
            variable: default_variable(),
            alone_key: default_alone_key(),
            tap_alone: default_tap_alone(),
        }
    }
}

/// Where and how the compiled profile is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Karabiner configuration file to write
    #[serde(default = "OutputConfig::default_path")]
    pub path: PathBuf,
    /// Name of the profile holding the generated rules
    #[serde(default = "default_profile_name")]
    pub profile_name: String,
    /// Value of `global.show_in_menu_bar` in a freshly written document
    #[serde(default)]
    pub show_in_menu_bar: bool,
    /// Merge into an existing document instead of replacing it
    #[serde(default)]
    pub merge: bool,
}

fn default_profile_name() -> String {
    "Default".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            profile_name: default_profile_name(),
            show_in_menu_bar: false,
            merge: false,
        }
    }
}

impl OutputConfig {
    /// Gets the default Karabiner configuration path.
    ///
    /// Karabiner-Elements always reads `~/.config/karabiner/karabiner.json`,
    /// on every platform it runs on.
    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("karabiner")
            .join("karabiner.json")
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Layer spec used when `--spec` is omitted
    pub spec: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/HyperLayers/config.toml`
/// - macOS: `~/Library/Application Support/HyperLayers/config.toml`
/// - Windows: `%APPDATA%\HyperLayers\config.toml`
///
/// `HYPERLAYERS_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - `hyper.variable` must be non-empty and must not use the sublayer flag prefix
/// - `hyper.alone_key` must differ from `hyper.trigger_key` when `tap_alone` is set
/// - `output.profile_name` must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Hyper key settings
    #[serde(default)]
    pub hyper: HyperConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// - Linux: `~/.config/HyperLayers/`
    /// - macOS: `~/Library/Application Support/HyperLayers/`
    /// - Windows: `%APPDATA%\HyperLayers\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("HyperLayers");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let variable = &self.hyper.variable;
        if variable.trim().is_empty() {
            anyhow::bail!("Hyper variable name cannot be empty");
        }

        // A hyper flag named like a sublayer flag could be cleared by a toggle rule
        if variable.starts_with(SUBLAYER_FLAG_PREFIX) {
            anyhow::bail!(
                "Hyper variable '{}' must not start with '{}'",
                variable,
                SUBLAYER_FLAG_PREFIX
            );
        }

        if self.hyper.tap_alone && self.hyper.alone_key == self.hyper.trigger_key {
            anyhow::bail!(
                "Hyper alone key cannot be the trigger key itself ({})",
                self.hyper.trigger_key
            );
        }

        if self.output.profile_name.trim().is_empty() {
            anyhow::bail!("Profile name cannot be empty");
        }

        Ok(())
    }
}
