//! Karabiner profile document output.
//!
//! Compiled rules are written as a complete `karabiner.json` document, or
//! merged into an existing one so that devices, simple modifications and
//! other profiles survive.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::OutputConfig;
use crate::models::RuleGroup;

/// Top-level `karabiner.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KarabinerConfig {
    /// Global settings
    pub global: GlobalSettings,
    /// Profiles, exactly one of which is selected
    pub profiles: Vec<Profile>,
}

/// The `global` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalSettings {
    /// Whether Karabiner shows its menu bar icon
    pub show_in_menu_bar: bool,
}

/// One Karabiner profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    /// Profile name shown in Karabiner's settings
    pub name: String,
    /// Complex modification rules
    pub complex_modifications: ComplexModifications,
    /// Whether this profile is active
    pub selected: bool,
}

/// The `complex_modifications` section of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexModifications {
    /// Rule groups in evaluation order
    pub rules: Vec<RuleGroup>,
}

impl KarabinerConfig {
    /// Builds a single-profile document holding `rules`.
    #[must_use]
    pub fn new(rules: Vec<RuleGroup>, output: &OutputConfig) -> Self {
        Self {
            global: GlobalSettings {
                show_in_menu_bar: output.show_in_menu_bar,
            },
            profiles: vec![Profile {
                name: output.profile_name.clone(),
                complex_modifications: ComplexModifications { rules },
                selected: true,
            }],
        }
    }
}

/// Service for rendering and writing Karabiner documents.
pub struct ProfileService;

impl ProfileService {
    /// Renders any document as 2-space indented JSON with a trailing newline.
    pub fn render<T: Serialize>(document: &T) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(document).context("Failed to serialize profile")?;
        json.push('\n');
        Ok(json)
    }

    /// Inserts `rules` into an existing document under `profile_name`.
    ///
    /// The named profile keeps every field except
    /// `complex_modifications.rules`. When no profile carries the name, a new
    /// one is appended; it is selected only if it is the sole profile.
    pub fn merge(mut document: Value, rules: &[RuleGroup], profile_name: &str) -> Result<Value> {
        let rules = serde_json::to_value(rules).context("Failed to serialize rules")?;

        let root = document
            .as_object_mut()
            .context("Existing Karabiner configuration is not a JSON object")?;
        let profiles = root
            .entry("profiles")
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .context("'profiles' in existing Karabiner configuration is not a list")?;

        let existing = profiles.iter_mut().find_map(|profile| {
            profile
                .as_object_mut()
                .filter(|p| p.get("name").and_then(Value::as_str) == Some(profile_name))
        });

        if let Some(profile) = existing {
            debug!("Replacing rules of existing profile '{}'", profile_name);
            let modifications = profile
                .entry("complex_modifications")
                .or_insert_with(|| Value::Object(Map::new()));
            match modifications.as_object_mut() {
                Some(section) => {
                    section.insert("rules".to_string(), rules);
                }
                None => anyhow::bail!(
                    "'complex_modifications' of profile '{}' is not an object",
                    profile_name
                ),
            }
        } else {
            debug!("Appending new profile '{}'", profile_name);
            let mut profile = Map::new();
            profile.insert("name".to_string(), Value::String(profile_name.to_string()));
            let mut section = Map::new();
            section.insert("rules".to_string(), rules);
            profile.insert("complex_modifications".to_string(), Value::Object(section));
            profile.insert("selected".to_string(), Value::Bool(profiles.is_empty()));
            profiles.push(Value::Object(profile));
        }

        Ok(document)
    }

    /// Produces the document text for `rules`, merging into the file at
    /// `path` when `merge` is set and the file exists.
    pub fn compose(
        rules: Vec<RuleGroup>,
        output: &OutputConfig,
        path: &Path,
        merge: bool,
    ) -> Result<String> {
        if merge && path.exists() {
            let content = fs::read_to_string(path).with_context(|| {
                format!("Failed to read Karabiner configuration: {}", path.display())
            })?;
            let existing: Value = serde_json::from_str(&content).with_context(|| {
                format!("Failed to parse Karabiner configuration: {}", path.display())
            })?;
            let merged = Self::merge(existing, &rules, &output.profile_name)?;
            return Self::render(&merged);
        }

        Self::render(&KarabinerConfig::new(rules, output))
    }

    /// Writes `content` to `path` using atomic write.
    ///
    /// Parent directories are created as needed. Uses temp file + rename so a
    /// running Karabiner never reads a half-written file.
    pub fn write(content: &str, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp file to: {}", path.display())
        })?;

        info!("Wrote Karabiner configuration to {}", path.display());
        Ok(())
    }

    /// Composes and writes the document for `rules` in one step.
    pub fn save(
        rules: Vec<RuleGroup>,
        output: &OutputConfig,
        path: &Path,
        merge: bool,
    ) -> Result<()> {
        let content = Self::compose(rules, output, path, merge)?;
        Self::write(&content, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::hyper_rule;
    use crate::config::HyperConfig;
    use serde_json::json;
    use tempfile::TempDir;

    fn output_config() -> OutputConfig {
        OutputConfig {
            profile_name: "Default".to_string(),
            ..OutputConfig::default()
        }
    }

    fn rules() -> Vec<RuleGroup> {
        vec![hyper_rule(&HyperConfig::default())]
    }

    #[test]
    fn test_document_shape() {
        let document = KarabinerConfig::new(rules(), &output_config());
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["global"], json!({ "show_in_menu_bar": false }));
        assert_eq!(value["profiles"][0]["name"], "Default");
        assert_eq!(value["profiles"][0]["selected"], true);
        assert_eq!(
            value["profiles"][0]["complex_modifications"]["rules"][0]["description"],
            "Hyper Key (⌃⌥⇧⌘)"
        );
    }

    #[test]
    fn test_render_uses_two_space_indent() {
        let text = ProfileService::render(&json!({ "global": { "show_in_menu_bar": false } }))
            .unwrap();
        assert_eq!(
            text,
            "{\n  \"global\": {\n    \"show_in_menu_bar\": false\n  }\n}\n"
        );
    }

    #[test]
    fn test_merge_replaces_rules_and_keeps_other_fields() {
        let existing = json!({
            "global": { "show_in_menu_bar": true },
            "profiles": [
                {
                    "name": "Default",
                    "selected": true,
                    "devices": [{ "identifiers": { "vendor_id": 1452 } }],
                    "complex_modifications": {
                        "parameters": { "basic.to_if_alone_timeout_milliseconds": 500 },
                        "rules": [{ "description": "old", "manipulators": [] }]
                    }
                },
                { "name": "Gaming", "selected": false }
            ]
        });

        let merged = ProfileService::merge(existing, &rules(), "Default").unwrap();

        assert_eq!(merged["global"]["show_in_menu_bar"], true);
        let profile = &merged["profiles"][0];
        assert_eq!(profile["devices"][0]["identifiers"]["vendor_id"], 1452);
        assert_eq!(
            profile["complex_modifications"]["parameters"]["basic.to_if_alone_timeout_milliseconds"],
            500
        );
        let new_rules = profile["complex_modifications"]["rules"].as_array().unwrap();
        assert_eq!(new_rules.len(), 1);
        assert_eq!(new_rules[0]["description"], "Hyper Key (⌃⌥⇧⌘)");
        assert_eq!(merged["profiles"][1], json!({ "name": "Gaming", "selected": false }));
    }

    #[test]
    fn test_merge_appends_missing_profile() {
        let existing = json!({ "profiles": [{ "name": "Default", "selected": true }] });

        let merged = ProfileService::merge(existing, &rules(), "Hyper").unwrap();
        let profiles = merged["profiles"].as_array().unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[1]["name"], "Hyper");
        assert_eq!(profiles[1]["selected"], false);
        assert!(profiles[1]["complex_modifications"]["rules"].is_array());
    }

    #[test]
    fn test_merge_into_document_without_profiles() {
        let merged = ProfileService::merge(json!({}), &rules(), "Default").unwrap();
        assert_eq!(merged["profiles"][0]["selected"], true);
    }

    #[test]
    fn test_merge_rejects_non_object() {
        assert!(ProfileService::merge(json!([1, 2]), &rules(), "Default").is_err());
        assert!(ProfileService::merge(json!({ "profiles": 3 }), &rules(), "Default").is_err());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("karabiner").join("karabiner.json");

        ProfileService::save(rules(), &output_config(), &path, false).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["profiles"][0]["name"], "Default");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_save_merge_without_existing_file_writes_fresh_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("karabiner.json");

        ProfileService::save(rules(), &output_config(), &path, true).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["global"]["show_in_menu_bar"], false);
    }

    #[test]
    fn test_save_merge_keeps_foreign_profile() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("karabiner.json");
        fs::write(
            &path,
            r#"{"profiles":[{"name":"Work","selected":true},{"name":"Default","selected":false}]}"#,
        )
        .unwrap();

        ProfileService::save(rules(), &output_config(), &path, true).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["profiles"][0], json!({ "name": "Work", "selected": true }));
        assert_eq!(written["profiles"][1]["selected"], false);
        assert_eq!(
            written["profiles"][1]["complex_modifications"]["rules"][0]["manipulators"][0]["from"]
                ["key_code"],
            "caps_lock"
        );
    }

    #[test]
    fn test_save_merge_reports_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("karabiner.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ProfileService::save(rules(), &output_config(), &path, true).unwrap_err();
        assert!(err.to_string().contains("Failed to parse Karabiner configuration"));
    }
}
