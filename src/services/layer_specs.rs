//! Layer spec file I/O service.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::{config::Config, models::LayerSpec, parser};

/// Service for locating and loading layer spec files.
pub struct LayerSpecService;

impl LayerSpecService {
    /// Loads a layer spec from a TOML, JSON/JSON5 or YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the spec file to load
    ///
    /// # Returns
    ///
    /// * `Ok(LayerSpec)` - Successfully parsed spec
    /// * `Err(...)` - File not found, parse error, or I/O error
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use hyperlayers::services::LayerSpecService;
    ///
    /// let spec = LayerSpecService::load(Path::new("hyper.toml"))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<LayerSpec> {
        parser::load_layer_spec(path)
            .with_context(|| format!("Failed to load layer spec from {}", path.display()))
    }

    /// Resolves which spec file to use: the explicit argument, else the
    /// configured default.
    pub fn resolve_path(explicit: Option<&Path>, config: &Config) -> Result<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| config.paths.spec.clone())
            .context(
                "No layer spec given. Pass --spec <FILE> or set a default with \
                 `config set --spec <FILE>`",
            )
    }
}
