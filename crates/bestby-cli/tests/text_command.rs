//! End-to-end tests for the text command.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_labelled_expiry_from_stdin() {
    Command::cargo_bin("bestby")
        .unwrap()
        .args(["text", "-"])
        .write_stdin("EXP 12/2025\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("31-12-2025"));
}

#[test]
fn test_not_detected_on_noise() {
    Command::cargo_bin("bestby")
        .unwrap()
        .args(["text", "-"])
        .write_stdin("just a label, nothing dated\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("NOT DETECTED"));
}

#[test]
fn test_json_output_reports_candidates() {
    Command::cargo_bin("bestby")
        .unwrap()
        .args(["text", "-", "--format", "json"])
        .write_stdin("Use by 15.08.2025\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"expiry\": \"15-08-2025\""))
        .stdout(predicate::str::contains("\"labelled\""));
}

#[test]
fn test_derived_expiry_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("label.txt");
    std::fs::write(&path, "MFG 01-01-2023\nBest Before 6 months\n").unwrap();

    Command::cargo_bin("bestby")
        .unwrap()
        .arg("text")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("30-06-2023"));
}
