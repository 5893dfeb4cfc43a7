//! Integration tests for the repotext binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_cli_requires_root() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repotext"));
    cmd.assert().failure();
}

#[test]
fn test_cli_missing_root_fails() {
    let out = tempdir().unwrap();
    let output = out.path().join("report.txt");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repotext"));
    cmd.arg(out.path().join("nope")).arg("-o").arg(&output);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: repository path"))
        .stderr(predicate::str::contains("does not exist"));
    assert!(!output.exists());
}

#[test]
fn test_cli_writes_report() {
    let repo = tempdir().unwrap();
    fs::write(repo.path().join("a.txt"), "hello\n").unwrap();
    let out = tempdir().unwrap();
    let output = out.path().join("report.txt");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repotext"));
    cmd.arg(repo.path())
        .args(["--output"])
        .arg(&output)
        .args(["--history", "off"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Repository contents saved to"));
    let report = fs::read_to_string(&output).unwrap();
    assert_eq!(report, "# File Tree and Contents\n\n## a.txt\nhello\n\n");
}

#[test]
fn test_cli_markdown_format() {
    let repo = tempdir().unwrap();
    fs::write(repo.path().join("main.rs"), "fn main() {}\n").unwrap();
    let out = tempdir().unwrap();
    let output = out.path().join("report.md");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repotext"));
    cmd.arg(repo.path())
        .arg("-o")
        .arg(&output)
        .args(["--format", "markdown", "--history", "off"]);
    cmd.assert().success();
    let report = fs::read_to_string(&output).unwrap();
    assert!(report.contains("```rust\nfn main() {}\n```"));
}

#[test]
fn test_cli_rejects_unknown_binary_detection() {
    let repo = tempdir().unwrap();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repotext"));
    cmd.arg(repo.path()).args(["--binary-detection", "magic"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid binary detection method"));
}

#[test]
fn test_cli_honours_rust_log() {
    let repo = tempdir().unwrap();
    fs::write(repo.path().join("a.txt"), "hello\n").unwrap();
    let out = tempdir().unwrap();
    let output = out.path().join("report.txt");

    let mut quiet = Command::new(assert_cmd::cargo::cargo_bin!("repotext"));
    quiet
        .env_remove("RUST_LOG")
        .arg(repo.path())
        .arg("-o")
        .arg(&output)
        .args(["--history", "off"]);
    quiet
        .assert()
        .success()
        .stderr(predicate::str::contains("Scanning").not());

    let mut chatty = Command::new(assert_cmd::cargo::cargo_bin!("repotext"));
    chatty
        .env("RUST_LOG", "debug")
        .arg(repo.path())
        .arg("-o")
        .arg(&output)
        .args(["--history", "off"]);
    chatty
        .assert()
        .success()
        .stderr(predicate::str::contains("Scanning"));
}

#[test]
fn test_cli_reads_default_ignore_file() {
    let repo = tempdir().unwrap();
    fs::write(repo.path().join(".gitignore"), "b.txt\n").unwrap();
    fs::write(repo.path().join("a.txt"), "a\n").unwrap();
    fs::write(repo.path().join("b.txt"), "b\n").unwrap();
    let out = tempdir().unwrap();
    let output = out.path().join("report.txt");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repotext"));
    cmd.arg(repo.path())
        .arg("-o")
        .arg(&output)
        .args(["--history", "off"]);
    cmd.assert().success();
    let report = fs::read_to_string(&output).unwrap();
    assert!(report.contains("## a.txt\na\n"));
    assert!(!report.contains("## b.txt"));
}
