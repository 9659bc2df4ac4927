//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test file uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Two sublayers and one direct binding; validates without findings.
pub const SPEC_BASIC: &str = r#"
spacebar = { open = "raycast://extensions/raycast/raycast-ai/ai-chat" }

[o]
g = { app = "Google Chrome" }
1 = { app = "1Password" }

[w]
h = { window = "left-half" }
l = { window = "right-half" }
u = { key = "tab", modifiers = ["right_control", "right_shift"], description = "Window: Previous Tab" }
"#;

/// Valid, but with an empty sublayer (one warning).
pub const SPEC_WITH_WARNING: &str = r#"
[o]
g = { app = "Google Chrome" }

[x]
"#;

/// Binds the hyper key itself at the top level (one error).
pub const SPEC_WITH_ERROR: &str = r#"
caps_lock = { app = "Finder" }

[o]
g = { app = "Google Chrome" }
"#;

/// Same layers as [`SPEC_BASIC`] in JSON.
pub const SPEC_BASIC_JSON: &str = r#"{
  "spacebar": { "open": "raycast://extensions/raycast/raycast-ai/ai-chat" },
  "o": {
    "g": { "app": "Google Chrome" },
    "1": { "app": "1Password" }
  },
  "w": {
    "h": { "window": "left-half" },
    "l": { "window": "right-half" },
    "u": {
      "key": "tab",
      "modifiers": ["right_control", "right_shift"],
      "description": "Window: Previous Tab"
    }
  }
}"#;

/// Writes `content` to `file_name` inside a fresh temporary directory.
///
/// # Returns
/// The file path and the directory guard (keep it alive for the test).
pub fn create_temp_spec_file(content: &str, file_name: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(file_name);
    fs::write(&path, content).expect("Failed to write spec file");
    (path, temp_dir)
}

/// Path of the sample spec shipped with the crate.
pub fn sample_spec_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join("hyper.toml")
}

/// Path to the hyperlayers binary
pub fn hyperlayers_bin() -> &'static str {
    env!("CARGO_BIN_EXE_hyperlayers")
}

/// Creates a Command with an isolated config directory.
///
/// Pass the same directory to several commands to share configuration
/// between them within one test.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(hyperlayers_bin());
    cmd.env("HYPERLAYERS_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Reads and parses a JSON file.
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read output file");
    serde_json::from_str(&content).expect("Output should be valid JSON")
}
