//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the naming scheme for flag variables.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "HyperLayers";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "hyperlayers";

/// Prefix of every sublayer flag variable (`sublayer_<key>`).
pub const SUBLAYER_FLAG_PREFIX: &str = "sublayer_";

/// Default name of the global modifier flag.
pub const DEFAULT_HYPER_VARIABLE: &str = "hyper";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "HYPERLAYERS_CONFIG_DIR";
