//! Layer spec file parsing.
//!
//! A spec file maps trigger keys to either a leaf action or a sublayer table.
//! TOML, JSON/JSON5 and YAML documents share the same structure:
//!
//! ```toml
//! spacebar = { open = "raycast://extensions/raycast/raycast-ai/ai-chat" }
//!
//! [o]
//! g = { app = "Google Chrome" }
//! 1 = { app = "1Password" }
//!
//! [w]
//! h = { window = "left-half" }
//! u = { key = "tab", modifiers = ["right_control", "right_shift"], description = "Previous Tab" }
//!
//! [x]   # empty sublayer
//! ```
//!
//! A table is a leaf when it has exactly one of the effect fields `open`,
//! `app`, `window`, `key`, `shell` or `to`; `description` and (for `key`)
//! `modifiers` may accompany it. Any other table is a sublayer. None of these
//! field names is a key name, so the two cases never overlap.

use crate::actions;
use crate::constants::APP_BINARY_NAME;
use crate::models::{KeyCode, LayerSpec, LeafAction, Modifier, OutputAction, SublayerMapping};
use crate::parser::document::SpecDocument;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Fields that define a leaf's effect.
const EFFECT_FIELDS: [&str; 6] = ["open", "app", "window", "key", "shell", "to"];

/// Fields that select the kind of a raw `to` entry.
const OUTPUT_FIELDS: [&str; 3] = ["set_variable", "shell_command", "key_code"];

/// Document syntax of a spec file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// `.toml`
    Toml,
    /// `.json` or `.json5`
    Json5,
    /// `.yaml` or `.yml`
    Yaml,
}

impl SpecFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" | "json5" => Ok(Self::Json5),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unsupported spec file extension for {}: expected .toml, .json, .json5, .yaml or .yml",
                path.display()
            ),
        }
    }
}

/// Loads and parses a layer spec file.
///
/// # Errors
///
/// Returns errors for:
/// - File not found or not a regular file
/// - Unsupported extension
/// - Syntax errors in the document
/// - Unknown key names, unknown fields, or malformed leaf actions
pub fn load_layer_spec(path: &Path) -> Result<LayerSpec> {
    if !path.exists() {
        anyhow::bail!(
            "Layer spec not found: {}\n\n\
             Please check the file path and try again.\n\
             To validate a spec without writing anything, run: {} validate --spec <FILE>",
            path.display(),
            APP_BINARY_NAME
        );
    }

    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }

    let format = SpecFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layer spec: {}", path.display()))?;

    parse_layer_spec(&content, format)
        .with_context(|| format!("Invalid layer spec: {}", path.display()))
}

/// Parses a layer spec document.
///
/// A key repeated within one table is an error in every format.
pub fn parse_layer_spec(content: &str, format: SpecFormat) -> Result<LayerSpec> {
    let SpecDocument(document) = match format {
        SpecFormat::Toml => toml::from_str(content).context("Failed to parse TOML")?,
        SpecFormat::Json5 => json5::from_str(content).context("Failed to parse JSON")?,
        SpecFormat::Yaml => serde_yml::from_str(content).context("Failed to parse YAML")?,
    };

    spec_from_value(&document)
}

/// Builds a spec from an already parsed document.
pub fn spec_from_value(document: &Value) -> Result<LayerSpec> {
    let Some(entries) = document.as_object() else {
        anyhow::bail!("Layer spec must be a table of trigger keys");
    };

    let mut spec = LayerSpec::new();
    for (name, value) in entries {
        let key = parse_key(name)?;
        let Some(table) = value.as_object() else {
            anyhow::bail!("'{}' must be a table (an action or a sublayer)", name);
        };

        if is_leaf(table) {
            spec.insert(key, leaf_from_table(name, table)?)?;
        } else {
            spec.insert(key, sublayer_from_table(name, table)?)?;
        }
    }

    Ok(spec)
}

fn parse_key(name: &str) -> Result<KeyCode> {
    name.parse()
        .with_context(|| format!("'{}' is not a key name Karabiner understands", name))
}

fn is_leaf(table: &Map<String, Value>) -> bool {
    EFFECT_FIELDS.iter().any(|field| table.contains_key(*field))
}

fn sublayer_from_table(trigger: &str, table: &Map<String, Value>) -> Result<SublayerMapping> {
    let mut mapping = SublayerMapping::new();

    for (name, value) in table {
        let path = format!("{trigger}.{name}");
        let key = parse_key(name).with_context(|| format!("In sublayer '{}'", trigger))?;

        let Some(binding) = value.as_object() else {
            anyhow::bail!("'{}' must be an action table", path);
        };
        if !is_leaf(binding) {
            anyhow::bail!(
                "'{}' must be an action (one of: {}); nested sublayers are not supported",
                path,
                EFFECT_FIELDS.join(", ")
            );
        }

        mapping.insert(key, leaf_from_table(&path, binding)?)?;
    }

    Ok(mapping)
}

fn leaf_from_table(path: &str, table: &Map<String, Value>) -> Result<LeafAction> {
    let effects: Vec<&str> = EFFECT_FIELDS
        .iter()
        .copied()
        .filter(|field| table.contains_key(*field))
        .collect();
    if effects.len() != 1 {
        anyhow::bail!(
            "'{}' sets {} together; use exactly one action per key",
            path,
            effects.join(" and ")
        );
    }

    for field in table.keys() {
        let known = EFFECT_FIELDS.contains(&field.as_str()) || field == "description";
        let modifiers_with_key = field == "modifiers" && effects[0] == "key";
        if !known && !modifiers_with_key {
            anyhow::bail!("'{}' has unexpected field '{}'", path, field);
        }
    }

    let action = match effects[0] {
        "open" => actions::open(text_field(table, path, "open")?),
        "app" => actions::app(text_field(table, path, "app")?),
        "window" => actions::window(text_field(table, path, "window")?),
        "shell" => actions::shell(text_field(table, path, "shell")?),
        "key" => {
            let key_code =
                parse_key(text_field(table, path, "key")?).with_context(|| format!("In '{}'", path))?;
            let modifiers: Vec<Modifier> = match table.get("modifiers") {
                Some(value) => serde_json::from_value(value.clone())
                    .with_context(|| format!("'{}.modifiers' is not a list of modifiers", path))?,
                None => Vec::new(),
            };
            actions::key(key_code, &modifiers)
        }
        _ => {
            let raw = table.get("to").cloned().unwrap_or_default();
            if let Some(items) = raw.as_array() {
                for (idx, item) in items.iter().enumerate() {
                    check_output_fields(&format!("{path}.to[{idx}]"), item)?;
                }
            }
            let outputs: Vec<OutputAction> = serde_json::from_value(raw)
                .with_context(|| format!("'{}.to' is not a list of output actions", path))?;
            LeafAction::new(outputs)
        }
    };

    match table.get("description") {
        Some(Value::String(label)) => Ok(action.with_label(label.as_str())),
        Some(_) => anyhow::bail!("'{}.description' must be a string", path),
        None => Ok(action),
    }
}

fn check_output_fields(path: &str, raw: &Value) -> Result<()> {
    let Some(fields) = raw.as_object() else {
        anyhow::bail!("'{}' must be an output action table", path);
    };

    let kinds: Vec<&str> = OUTPUT_FIELDS
        .iter()
        .copied()
        .filter(|field| fields.contains_key(*field))
        .collect();
    match kinds.as_slice() {
        [_] => {}
        [] => anyhow::bail!(
            "'{}' must set one of: {}",
            path,
            OUTPUT_FIELDS.join(", ")
        ),
        _ => anyhow::bail!(
            "'{}' sets {} together; each output action does exactly one thing",
            path,
            kinds.join(" and ")
        ),
    }

    for field in fields.keys() {
        let known = OUTPUT_FIELDS.contains(&field.as_str());
        let modifiers_with_key = field == "modifiers" && kinds[0] == "key_code";
        if !known && !modifiers_with_key {
            anyhow::bail!("'{}' has unexpected field '{}'", path, field);
        }
    }

    Ok(())
}

fn text_field<'a>(table: &'a Map<String, Value>, path: &str, field: &str) -> Result<&'a str> {
    table
        .get(field)
        .and_then(Value::as_str)
        .with_context(|| format!("'{}.{}' must be a string", path, field))
}
