//! CLI integration tests for a full kitchen run.

use std::process::Command;

fn kitchen_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ramen_kitchen"))
}

fn summary_value<'a>(stdout: &'a str, key: &str) -> &'a str {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
        .unwrap_or_else(|| panic!("{key} line missing"))
        .trim()
}

#[test]
fn ten_packets_are_all_cooked_without_sharing_burners() {
    // Short cook and jitter so the run finishes quickly.
    let output = kitchen_bin()
        .args(["10", "5", "5"])
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to run kitchen binary");

    assert!(
        output.status.success(),
        "run exited with non-zero status: {:?}",
        output.status
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RUN SUMMARY"), "run summary missing from output");
    assert_eq!(summary_value(&stdout, "units_consumed"), "10");
    assert_eq!(summary_value(&stdout, "remaining_units"), "0");
    assert_eq!(
        summary_value(&stdout, "burner_claims"),
        summary_value(&stdout, "burner_releases")
    );
    assert_eq!(summary_value(&stdout, "burner_violation"), "false");
    assert_eq!(summary_value(&stdout, "consistent"), "true");

    // Every consumed packet shows up in the event log.
    let stderr = String::from_utf8_lossy(&output.stderr);
    let consumed = stderr.lines().filter(|line| line.ends_with(" left")).count();
    assert_eq!(consumed, 10);
    let on = stderr.lines().filter(|line| line.ends_with("] ON")).count();
    let off = stderr.lines().filter(|line| line.ends_with("] OFF")).count();
    assert_eq!(on, off);
}

#[test]
fn zero_packets_never_touches_a_burner() {
    let output = kitchen_bin()
        .args(["0", "5", "5"])
        .output()
        .expect("failed to run kitchen binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(summary_value(&stdout, "units_consumed"), "0");
    assert_eq!(summary_value(&stdout, "burner_claims"), "0");
}

#[test]
fn missing_count_is_a_startup_error() {
    let output = kitchen_bin()
        .output()
        .expect("failed to run kitchen binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing ramen count"), "stderr: {stderr}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("RUN SUMMARY"));
}

#[test]
fn non_numeric_count_is_a_startup_error() {
    let output = kitchen_bin()
        .arg("lots")
        .output()
        .expect("failed to run kitchen binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid units value: lots"), "stderr: {stderr}");
    // No cook ever started.
    assert!(!stderr.contains(" left"));
}
