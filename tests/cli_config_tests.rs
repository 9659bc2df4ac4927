//! End-to-end tests for `hyperlayers config` commands.

use std::fs;

mod fixtures;
use fixtures::*;

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(&["config", "show"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Trigger Key: caps_lock"));
    assert!(stdout.contains("Tap Alone:   escape"));
    assert!(stdout.contains("Layer Spec: (not configured)"));
}

#[test]
fn test_config_show_reports_whether_file_exists() {
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(&["config", "show"], config_dir.path())
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(not saved yet, using defaults)"));

    let output = isolated_command(&["config", "set", "--merge", "true"], config_dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let output = isolated_command(&["config", "show"], config_dir.path())
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("config.toml"));
    assert!(!stdout.contains("not saved yet"));
    assert!(stdout.contains("Merge:            true"));
}

#[test]
fn test_config_show_json_schema() {
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(&["config", "show", "--json"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["hyper"]["trigger_key"], "caps_lock");
    assert_eq!(result["hyper"]["variable"], "hyper");
    assert_eq!(result["hyper"]["alone_key"], "escape");
    assert_eq!(result["hyper"]["tap_alone"], true);
    assert_eq!(result["output"]["profile_name"], "Default");
    assert_eq!(result["output"]["merge"], false);
    assert!(result["output"]["path"]
        .as_str()
        .unwrap()
        .ends_with("karabiner.json"));
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_hyper_settings() {
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(
        &[
            "config",
            "set",
            "--trigger-key",
            "right_option",
            "--variable",
            "meh",
            "--no-tap-alone",
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config_dir.path().join("config.toml").exists());

    let show = isolated_command(&["config", "show", "--json"], config_dir.path())
        .output()
        .expect("Failed to execute command");
    let result: serde_json::Value = serde_json::from_slice(&show.stdout).unwrap();

    assert_eq!(result["hyper"]["trigger_key"], "right_option");
    assert_eq!(result["hyper"]["variable"], "meh");
    assert_eq!(result["hyper"]["tap_alone"], false);
}

#[test]
fn test_config_set_output_settings() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let out_path = config_dir.path().join("karabiner.json");

    let output = isolated_command(
        &[
            "config",
            "set",
            "--output",
            out_path.to_str().unwrap(),
            "--profile",
            "Hyper",
            "--merge",
            "true",
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let content = fs::read_to_string(config_dir.path().join("config.toml")).unwrap();
    assert!(content.contains("profile_name = \"Hyper\""));
    assert!(content.contains("merge = true"));
}

#[test]
fn test_config_set_spec_used_by_build() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let (spec_path, temp_dir) = create_temp_spec_file(SPEC_BASIC, "layers.toml");
    let out_path = temp_dir.path().join("karabiner.json");

    let set = isolated_command(
        &[
            "config",
            "set",
            "--spec",
            spec_path.to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");
    assert_eq!(set.status.code(), Some(0));

    let build = isolated_command(&["build"], config_dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(
        build.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&build.stderr)
    );
    assert!(out_path.exists());
}

#[test]
fn test_config_set_unknown_key() {
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(
        &["config", "set", "--trigger-key", "hyper"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown key code"));
}

#[test]
fn test_config_set_rejects_sublayer_prefixed_variable() {
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(
        &["config", "set", "--variable", "sublayer_hyper"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_alone_key_equal_to_trigger() {
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(
        &["config", "set", "--alone-key", "caps_lock"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_set_missing_spec_file() {
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(
        &["config", "set", "--spec", "/nonexistent/layers.toml"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_config_set_no_values_specified() {
    let config_dir = tempfile::TempDir::new().unwrap();

    let output = isolated_command(&["config", "set"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("At least one configuration option"));
}

#[test]
fn test_config_invalid_file_is_reported() {
    let config_dir = tempfile::TempDir::new().unwrap();
    fs::write(config_dir.path().join("config.toml"), "[hyper\n").unwrap();

    let output = isolated_command(&["config", "show"], config_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"));
}
