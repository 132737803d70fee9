//! CLI end-to-end tests that exercise the binary against the shared fixture
//! documents. These complement `cli_tests.rs` by using fixture files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../tests/fixtures");

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("jsonschema2openapi").expect("binary should exist")
}

fn fixture_path(name: &str) -> String {
    format!("{FIXTURES_DIR}/{name}")
}

// ── E2E: reference output ───────────────────────────────────────────────────

#[test]
fn test_cli_e2e_data_matches_reference_output() {
    let expected = fs::read_to_string(fixture_path("data.expected.json")).unwrap();

    cmd()
        .args(["merge", &fixture_path("data.schema.json")])
        .args(["--template", &fixture_path("data.template.json")])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", expected.trim_end())));
}

// ── E2E: discriminator ──────────────────────────────────────────────────────

#[test]
fn test_cli_e2e_events_discriminator() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("openapi.json");
    let report = dir.path().join("report.json");

    cmd()
        .args(["merge", &fixture_path("events.schema.json")])
        .args(["--template", &fixture_path("minimal.template.json")])
        .args(["-o", output.to_str().unwrap()])
        .args(["--report", report.to_str().unwrap()])
        .assert()
        .success();

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        doc["components"]["schemas"]["events.Event"]["discriminator"]["mapping"],
        serde_json::json!({
            "v1": "#/components/schemas/v1events.Event",
            "v2": "#/components/schemas/v2events.Event"
        })
    );

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    let extracted: Vec<_> = report["rewrites"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["type"] == "discriminator_extracted")
        .collect();
    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted[0]["path"], "#/definitions/events.Event");
    assert_eq!(extracted[0]["cases"], serde_json::json!(["v1", "v2"]));
}

// ── E2E: verbose logging stays off stdout ───────────────────────────────────

#[test]
fn test_cli_e2e_verbose_logs_to_stderr() {
    let output = cmd()
        .args(["--verbose", "translate", &fixture_path("data.schema.json")])
        .assert()
        .success()
        .stderr(predicate::str::contains("expanded conditional"))
        .get_output()
        .stdout
        .clone();

    let definitions: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be pure JSON");
    assert!(definitions.get("Data").is_some());
}

// ── E2E: full-depth conditionals ────────────────────────────────────────────

#[test]
fn test_cli_e2e_full_depth_flag() {
    cmd()
        .args(["translate", &fixture_path("data.schema.json")])
        .args(["--conditionals", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"anyOf\"").and(predicate::str::contains("\"if\"").not()));
}
