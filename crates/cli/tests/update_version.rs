//! `update-version` argument handling and exit codes.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn zint_cmd() -> Command {
    Command::new(cargo::cargo_bin!("zint-tools"))
}

#[test]
fn major_zero_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = zint_cmd()
        .args(["--output", "pretty", "update-version", "0", "1", "0", "--root"])
        .arg(dir.path())
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error:"), "{stderr}");
}

#[test]
fn build_other_than_zero_or_nine_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = zint_cmd()
        .args(["--output", "json", "update-version", "2", "13", "0", "5", "--root"])
        .arg(dir.path())
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json envelope");
    assert_eq!(v["success"], false);
    assert_eq!(v["error"], "command_failed");
}

#[test]
fn non_numeric_component_is_a_usage_error() {
    let output = zint_cmd()
        .args(["update-version", "two", "13", "0"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_tree_stops_at_first_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("CMakeLists.txt"), "set(ZINT_VERSION_MAJOR 2)\n").expect("write");
    let output = zint_cmd()
        .args(["--output", "json", "update-version", "2", "13", "0", "--root"])
        .arg(dir.path())
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json envelope");
    let message = v["message"].as_str().expect("message");
    assert!(message.contains("only did 1 replacements of 4"), "{message}");
    // Counts are checked before writing, so the file is untouched.
    assert_eq!(
        fs::read_to_string(dir.path().join("CMakeLists.txt")).expect("read"),
        "set(ZINT_VERSION_MAJOR 2)\n"
    );
}
