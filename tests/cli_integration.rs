//! CLI integration tests
//!
//! These run the binary under its own name, where it serves the management
//! commands instead of wrapping a toolchain.

#![cfg(unix)]

mod support;

use support::{ccwrap, lines};

#[test]
fn test_cli_help() {
    let output = ccwrap(&["--help"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ccwrap"));
    assert!(stdout.contains("explain"));
    assert!(stdout.contains("names"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_cli_version() {
    let output = ccwrap(&["--version"], &[]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ccwrap"));
}

#[test]
fn test_names_lists_every_alias() {
    let output = ccwrap(&["names", "--format", "json"], &[]);

    assert!(output.status.success());
    let names: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = names
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    for expected in ["cpp", "cc", "c89", "c99", "c++", "f77", "gcc", "clang++", "gfortran", "ld"] {
        assert!(names.contains(&expected), "missing {}", expected);
    }
    assert_eq!(names.len(), 16);
}

#[test]
fn test_explain_json() {
    let output = ccwrap(
        &["explain", "--as", "c++", "--format", "json", "--", "-c", "foo.cpp", "-o", "foo.o"],
        &[("CCWRAP_CPPFLAGS", "-I/p/include"), ("CCWRAP_CXXFLAGS", "-std=c++17")],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["mode"], "cc");
    assert_eq!(plan["language"], "c++");
    assert_eq!(plan["command"], "c++");
    assert_eq!(
        plan["args"],
        serde_json::json!(["-I/p/include", "-std=c++17", "-c", "foo.cpp", "-o", "foo.o"])
    );
}

#[test]
fn test_explain_human() {
    let output = ccwrap(
        &["explain", "--as", "ld", "--", "-o", "a.out", "a.o"],
        &[("CCWRAP_PREFIX", "/p"), ("CCWRAP_PLATFORM", "linux")],
    );

    assert!(output.status.success());
    let stdout = lines(&output.stdout);
    assert!(stdout.iter().any(|l| l == "Mode:       link (ld)"));
    assert!(stdout.iter().any(|l| l == "AFTER:  ld -rpath /p/lib -o a.out a.o"));
}

#[test]
fn test_explain_unknown_name() {
    let output = ccwrap(&["explain", "--as", "icc", "--", "-c", "x.c"], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ccwrap names"));
}

#[test]
fn test_config_yaml() {
    let output = ccwrap(
        &["config", "--format", "yaml"],
        &[("CCWRAP_PREFIX", "/opt/tools"), ("CCWRAP_NO_RPATH", "on")],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("prefix: /opt/tools"));
    assert!(stdout.contains("rpath_enabled: false"));
}

#[test]
fn test_config_rejects_relative_prefix() {
    let output = ccwrap(&["config"], &[("CCWRAP_PREFIX", "relative/prefix")]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let output = ccwrap(&[], &[]);
    assert_eq!(output.status.code(), Some(2));
}
