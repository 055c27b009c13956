mod common;

use common::{run_stokemeet, TestEnv};

#[test]
fn summarize_subcommand_is_available() {
    let output = run_stokemeet(&["summarize", "--help"]);

    assert!(
        output.status.success(),
        "summarize --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("--type"));
}

#[test]
fn summarize_rejects_non_numeric_recording() {
    let output = run_stokemeet(&["summarize", "does-not-exist"]);

    assert!(!output.status.success());
}

#[test]
fn summarize_without_api_keys_reports_missing_key() {
    let output = run_stokemeet(&["summarize", "42"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !output.status.success(),
        "summarize should fail without credentials\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        stderr
    );
    assert!(
        stderr.contains("API key is missing"),
        "expected missing key error, got:\n{}",
        stderr
    );
}

#[test]
fn meetings_without_platform_key_reports_missing_key() {
    let env = TestEnv::new();
    let output = env.run(&["meetings"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Fathom API key is missing"),
        "expected missing platform key error, got:\n{}",
        stderr
    );
}
