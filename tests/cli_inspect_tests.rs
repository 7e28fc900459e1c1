//! End-to-end tests for `kle-keycaps inspect` command.

use std::process::{Command, Output};

use tempfile::TempDir;

mod fixtures;
use fixtures::*;

/// Path to the kle-keycaps binary
fn kle_keycaps_bin() -> &'static str {
    env!("CARGO_BIN_EXE_kle-keycaps")
}

/// Runs the binary with an empty, isolated config directory.
fn run(args: &[&str]) -> Output {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    Command::new(kle_keycaps_bin())
        .env("KLE_KEYCAPS_CONFIG_DIR", config_dir.path())
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_inspect_plain() {
    let path = fixture_path("numpad.json");
    let output = run(&["inspect", path.to_str().unwrap()]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "Should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Keyboard: Numpad"));
    assert!(stdout.contains("Keys: 17"));
    assert!(stdout.contains("Row 0:"));
    assert!(stdout.contains("Row 4:"));
    assert!(stdout.contains("\"Enter\""));
    assert!(stdout.contains("label 1: \"Home\""));
}

#[test]
fn test_inspect_json() {
    let path = fixture_path("numpad.json");
    let output = run(&["inspect", path.to_str().unwrap(), "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["name"], "Numpad");
    assert_eq!(result["led_color"], "#FF8800");
    assert_eq!(result["keys"].as_array().unwrap().len(), 17);
    assert_eq!(result["keys"][0]["legend"], "Num");
    assert_eq!(result["keys"][0]["labels"].as_array().unwrap().len(), 9);
}

#[test]
fn test_inspect_row_filter() {
    let path = fixture_path("numpad.json");
    let output = run(&["inspect", path.to_str().unwrap(), "--row", "4", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(result["row"], 4);
    let keys = result["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0]["width"], 2.0);
}

#[test]
fn test_inspect_empty_row() {
    let path = fixture_path("numpad.json");
    let output = run(&["inspect", path.to_str().unwrap(), "--row", "9"]);

    assert_eq!(output.status.code(), Some(1), "Empty row should exit with code 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No keys in row 9"));
}

#[test]
fn test_inspect_rotation_flag() {
    let path = fixture_path("rotated_cluster.json");

    let output = run(&["inspect", path.to_str().unwrap(), "--row", "1", "--json"]);
    let result: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(result["keys"][1]["rotation"], 0.0);

    let output = run(&[
        "inspect",
        path.to_str().unwrap(),
        "--row",
        "1",
        "--json",
        "--rotation",
        "carried",
    ]);
    let result: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(result["keys"][1]["rotation"], 15.0);
}

#[test]
fn test_inspect_invalid_rotation_mode() {
    let path = fixture_path("rotated_cluster.json");
    let output = run(&["inspect", path.to_str().unwrap(), "--rotation", "sideways"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sideways"));
    assert!(stderr.contains("per-key"), "Should list the accepted values");
}

#[test]
fn test_inspect_strict_json_flag() {
    let path = fixture_path("raw_pane.txt");

    let output = run(&["inspect", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));

    let output = run(&["inspect", path.to_str().unwrap(), "--strict-json"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not well-formed JSON"));
}

#[test]
fn test_inspect_structural_error() {
    let (path, _temp_dir) = create_temp_layout_file(r#"[["A"], 42]"#);
    let output = run(&["inspect", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("element 1"));
}

#[test]
fn test_inspect_nonexistent_file() {
    let output = run(&["inspect", "/tmp/nonexistent_kle_layout_xyz.json"]);

    assert_eq!(
        output.status.code(),
        Some(2),
        "Nonexistent file should exit with code 2"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "Should have error message on stderr");
}
