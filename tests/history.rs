//! History fetching against stand-in git executables.
//!
//! Kept to a single test so no other test forks while a freshly written
//! script is being executed.
#![cfg(unix)]

use repotext::{HistoryFetcher, HistoryPolicy, RepoTextBuilder, RepoTextError, scan};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn stand_in_git_programs() {
    let bin = tempdir().unwrap();
    let repo = tempdir().unwrap();
    fs::write(repo.path().join("a.txt"), "hello\n").unwrap();

    // A git that never finishes is killed once the limit passes.
    let slow = write_script(bin.path(), "slow-git", "exec sleep 30");
    let fetcher = HistoryFetcher::new(Some(Duration::from_millis(100))).program(&slow);
    let started = Instant::now();
    let err = fetcher
        .fetch_with_policy(repo.path(), HistoryPolicy::Required)
        .unwrap_err();
    assert!(matches!(err, RepoTextError::HistoryTimeout(_)));
    assert!(started.elapsed() < Duration::from_secs(10));

    let omitted = fetcher
        .fetch_with_policy(repo.path(), HistoryPolicy::BestEffort)
        .unwrap();
    assert!(omitted.is_none());

    let options = RepoTextBuilder::new(repo.path())
        .git_program(&slow)
        .history(HistoryPolicy::BestEffort)
        .history_timeout(Some(Duration::from_millis(100)))
        .build();
    let snapshot = scan(&options).unwrap();
    assert_eq!(snapshot.files.len(), 1);
    assert!(snapshot.history.is_none());

    // Plenty of stderr must not hold up stdout.
    let noisy = write_script(
        bin.path(),
        "noisy-git",
        "head -c 200000 /dev/zero >&2\necho 'abc1234 Initial commit'",
    );
    let history = HistoryFetcher::new(Some(Duration::from_secs(10)))
        .program(&noisy)
        .fetch(repo.path())
        .unwrap();
    assert_eq!(history, "abc1234 Initial commit\n");

    // A failing git reports its stderr.
    let failing = write_script(bin.path(), "failing-git", "echo 'not a git repository' >&2\nexit 128");
    let err = HistoryFetcher::new(None)
        .program(&failing)
        .fetch(repo.path())
        .unwrap_err();
    assert!(err.is_history());
    assert!(err.to_string().contains("not a git repository"));
}
