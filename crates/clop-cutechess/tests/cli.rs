//! Tests of the `clop-cutechess` binary's exit codes and output channels.

use std::process::{Command, Output};

fn adapter(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clop-cutechess"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run clop-cutechess")
}

#[test]
fn test_no_arguments_prints_help() {
    let output = adapter(&[]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CPU_ID"));
    assert!(stdout.contains("W = win"));
}

#[test]
fn test_help_flag_prints_help() {
    let output = adapter(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Replications"));
}

#[test]
fn test_short_help_flag_prints_help() {
    let output = adapter(&["-h"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("CPU_ID"));
}

#[test]
fn test_help_flag_after_cpu_id_is_usage_error() {
    let output = adapter(&["cpuA", "--help"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Too few arguments"));
}

#[test]
fn test_hyphen_cpu_id_reaches_validation() {
    let output = adapter(&["-x", "5", "X", "notanumber"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("invalid value for parameter X: notanumber"));
}

#[test]
fn test_invalid_parameter_value_exits_with_2() {
    let output = adapter(&["cpuA", "5", "X", "notanumber"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value for parameter X: notanumber"));
}

#[test]
fn test_too_few_arguments_exits_with_2() {
    let cases: [&[&str]; 4] = [
        &["cpuA"],
        &["cpuA", "0"],
        &["cpuA", "0", "A"],
        &["cpuA", "0", "A", "1", "B"],
    ];
    for args in cases {
        let output = adapter(args);

        assert_eq!(output.status.code(), Some(2), "args: {:?}", args);
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Too few arguments"));
    }
}

#[test]
fn test_invalid_seed_exits_with_2() {
    let output = adapter(&["cpuA", "x1", "A", "1"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid seed value: x1"));
}

#[test]
fn test_missing_cutechess_exits_with_2() {
    // the compiled-in example path does not exist on test machines
    let output = adapter(&["cpuA", "0", "A", "1"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to execute command"));
}
