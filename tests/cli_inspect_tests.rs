//! End-to-end tests for `hyperlayers inspect` command.

mod fixtures;
use fixtures::*;

#[test]
fn test_inspect_json() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let (spec_path, _temp_dir) = create_temp_spec_file(SPEC_BASIC, "layers.toml");

    let output = isolated_command(
        &["inspect", "--spec", spec_path.to_str().unwrap(), "--json"],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["hyper"]["trigger_key"], "caps_lock");
    assert_eq!(result["hyper"]["variable"], "hyper");

    let sublayers = result["sublayers"].as_array().unwrap();
    assert_eq!(sublayers.len(), 2);
    assert_eq!(sublayers[0]["key"], "o");
    assert_eq!(sublayers[0]["flag"], "sublayer_o");
    assert_eq!(sublayers[1]["flag"], "sublayer_w");

    let window_bindings = sublayers[1]["bindings"].as_array().unwrap();
    assert_eq!(window_bindings[0]["key"], "h");
    assert_eq!(window_bindings[0]["description"], "Window: left-half");
    assert_eq!(
        window_bindings[2]["actions"],
        serde_json::json!([{ "key_code": "tab", "modifiers": ["right_control", "right_shift"] }])
    );

    let direct = result["direct"].as_array().unwrap();
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0]["key"], "spacebar");
}

#[test]
fn test_inspect_plain() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let (spec_path, _temp_dir) = create_temp_spec_file(SPEC_WITH_WARNING, "layers.toml");

    let output = isolated_command(
        &["inspect", "--spec", spec_path.to_str().unwrap()],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hyper key: caps_lock"));
    assert!(stdout.contains("Sublayers (2):"));
    assert!(stdout.contains("o [sublayer_o]"));
    assert!(stdout.contains("Open -a 'Google Chrome.app'"));
    assert!(stdout.contains("x [sublayer_x]"));
    assert!(stdout.contains("(no bindings)"));
}

#[test]
fn test_inspect_yaml_spec() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let (spec_path, _temp_dir) = create_temp_spec_file(
        "c:\n  p:\n    key: play_or_pause\n  b:\n    key: rewind\n",
        "layers.yaml",
    );

    let output = isolated_command(
        &["inspect", "--spec", spec_path.to_str().unwrap(), "--json"],
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

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    let bindings = result["sublayers"][0]["bindings"].as_array().unwrap();
    assert_eq!(bindings[0]["actions"][0]["key_code"], "play_or_pause");
    assert_eq!(bindings[1]["actions"][0]["key_code"], "rewind");
}

#[test]
fn test_inspect_nested_sublayer_rejected() {
    let config_dir = tempfile::TempDir::new().unwrap();
    let (spec_path, _temp_dir) =
        create_temp_spec_file("[o.g]\na = { app = \"Arc\" }\n", "layers.toml");

    let output = isolated_command(
        &["inspect", "--spec", spec_path.to_str().unwrap()],
        config_dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("o.g"), "stderr: {stderr}");
}
