use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("iris").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("iris"));
}

#[test]
fn run_writes_charts_and_success_line() {
    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("charts");

    let mut cmd = Command::cargo_bin("iris").unwrap();
    cmd.args(["run", "--out-dir"]).arg(&out_dir);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Basic statistics:"))
        .stdout(predicate::str::contains(
            "All pipeline stages completed successfully!",
        ));

    let charts: Vec<_> = std::fs::read_dir(&out_dir).unwrap().collect();
    assert_eq!(charts.len(), 5);
}

#[test]
fn run_with_missing_data_file_exits_non_zero() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("iris").unwrap();
    cmd.args(["run", "--data"])
        .arg(dir.path().join("nope.csv"))
        .args(["--out-dir"])
        .arg(dir.path().join("charts"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn export_infers_format_from_extension() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("iris.json");

    let mut cmd = Command::cargo_bin("iris").unwrap();
    cmd.args(["export", "--out"]).arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Saved 150 rows"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.trim_start().starts_with('['));
}
