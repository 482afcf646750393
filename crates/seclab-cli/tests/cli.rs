// SPDX-License-Identifier: Apache-2.0

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const VULNERABLE_RS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../tests/security_fixtures/vulnerable/app.rs"
);
const VULNERABLE_JS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../tests/security_fixtures/vulnerable/server.js"
);
const SAFE_RS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../tests/security_fixtures/safe/app.rs"
);

#[test]
fn test_version() {
    cargo_bin_cmd!("seclab-scan")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("seclab-scan"));
}

#[test]
fn test_vulnerable_file_fails_gate() {
    let dir = TempDir::new().unwrap();
    let results = dir.path().join("results.txt");

    cargo_bin_cmd!("seclab-scan")
        .arg(VULNERABLE_JS)
        .arg("--results")
        .arg(&results)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED: 4 vulnerabilities found"));

    let written = std::fs::read_to_string(&results).unwrap();
    assert_eq!(
        written,
        "FAILED: 4 vulnerabilities found\n\
         SQL Injection vulnerability detected\n\
         Weak MD5 cryptography detected\n\
         Path traversal vulnerability detected\n\
         XSS vulnerability detected"
    );
}

#[test]
fn test_safe_file_passes_gate() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("seclab-scan")
        .current_dir(dir.path())
        .arg(SAFE_RS)
        .assert()
        .success()
        .stdout(predicate::str::contains("PASSED"));

    let written = std::fs::read_to_string(dir.path().join("security-test-results.txt")).unwrap();
    assert_eq!(written, "PASSED: No vulnerabilities detected");
}

#[test]
fn test_unrecognized_extension_is_still_scanned() {
    let dir = TempDir::new().unwrap();
    let source = std::fs::read_to_string(VULNERABLE_JS).unwrap();

    for name in ["server.mjs", "server"] {
        let target = dir.path().join(name);
        std::fs::write(&target, &source).unwrap();

        cargo_bin_cmd!("seclab-scan")
            .current_dir(dir.path())
            .arg(&target)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("FAILED: 4 vulnerabilities found"));

        let written =
            std::fs::read_to_string(dir.path().join("security-test-results.txt")).unwrap();
        assert!(written.starts_with("FAILED: 4 vulnerabilities found"), "{name}: {written}");
    }
}

#[test]
fn test_no_results_skips_artifact() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("seclab-scan")
        .current_dir(dir.path())
        .arg(VULNERABLE_RS)
        .arg("--no-results")
        .assert()
        .code(1);

    assert!(!dir.path().join("security-test-results.txt").exists());
}

#[test]
fn test_json_output() {
    let output = cargo_bin_cmd!("seclab-scan")
        .arg(VULNERABLE_RS)
        .arg("--no-results")
        .arg("--output")
        .arg("json")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["verdict"]["status"], "failed");
    assert_eq!(json["verdict"]["count"], 4);
    assert_eq!(
        json["categories"],
        serde_json::json!(["sql-injection", "weak-hash", "path-traversal", "xss"])
    );
    assert!(!json["advisories"].as_array().unwrap().is_empty());
}

#[test]
fn test_missing_file_exits_2() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("seclab-scan")
        .current_dir(dir.path())
        .arg("does-not-exist.js")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to scan does-not-exist.js"))
        .stderr(predicate::str::contains("Tip:"));

    assert!(!dir.path().join("security-test-results.txt").exists());
}
