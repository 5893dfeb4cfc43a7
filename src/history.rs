//! Condensed commit history via the `git` command line.

use crate::error::RepoTextError;
use crate::options::HistoryPolicy;
use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Program used when no other is configured.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Runs `<git> -C <root> log --oneline` with an optional time limit.
#[derive(Debug, Clone)]
pub struct HistoryFetcher {
    program: OsString,
    timeout: Option<Duration>,
}

impl Default for HistoryFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HistoryFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            program: OsString::from(DEFAULT_GIT_PROGRAM),
            timeout,
        }
    }

    /// Replaces the git executable (a name looked up on `PATH`, or a path).
    pub fn program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Returns the standard output of `git log --oneline`.
    ///
    /// With a timeout, a child that has not finished in time is killed and
    /// [`RepoTextError::HistoryTimeout`] is returned.
    ///
    /// # Errors
    ///
    /// [`RepoTextError::Run`] when git cannot be started, exits with a
    /// failure status (for instance outside a repository), or prints
    /// non-UTF-8 output.
    pub fn fetch(&self, root: &Path) -> Result<String, RepoTextError> {
        let mut child = Command::new(&self.program)
            .arg("-C")
            .arg(root)
            .args(["log", "--oneline"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RepoTextError::Run(format!("could not run git: {}", e)))?;

        // stderr drains on its own thread while stdout is awaited.
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut err = Vec::new();
                let _ = pipe.read_to_end(&mut err);
                err
            })
        });
        let mut stdout = child.stdout.take();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut out = Vec::new();
            let result = match stdout.as_mut() {
                Some(pipe) => pipe.read_to_end(&mut out).map(|_| out),
                None => Ok(out),
            };
            let _ = tx.send(result);
        });

        let received = match self.timeout {
            Some(limit) => match rx.recv_timeout(limit) {
                Ok(received) => received,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RepoTextError::HistoryTimeout(limit));
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(RepoTextError::Run("output reader stopped".to_string()));
                }
            },
            None => rx
                .recv()
                .map_err(|_| RepoTextError::Run("output reader stopped".to_string()))?,
        };
        let out = received.map_err(|e| RepoTextError::Run(e.to_string()))?;
        let status = child
            .wait()
            .map_err(|e| RepoTextError::Run(e.to_string()))?;
        if !status.success() {
            let err = stderr_reader
                .and_then(|reader| reader.join().ok())
                .unwrap_or_default();
            let stderr = String::from_utf8_lossy(&err);
            return Err(RepoTextError::Run(format!(
                "{}: {}",
                status,
                stderr.trim()
            )));
        }
        String::from_utf8(out).map_err(|e| RepoTextError::Run(format!("non-UTF-8 output: {}", e)))
    }

    /// Fetches history according to `policy`.
    ///
    /// `Ok(None)` means no history section: either the policy disables it,
    /// or the fetch failed or timed out under [`HistoryPolicy::BestEffort`].
    pub fn fetch_with_policy(
        &self,
        root: &Path,
        policy: HistoryPolicy,
    ) -> Result<Option<String>, RepoTextError> {
        match policy {
            HistoryPolicy::Disabled => Ok(None),
            HistoryPolicy::Required => self.fetch(root).map(Some),
            HistoryPolicy::BestEffort => match self.fetch(root) {
                Ok(history) => Ok(Some(history)),
                Err(e) => {
                    tracing::warn!("Omitting git history: {}", e);
                    Ok(None)
                }
            },
        }
    }
}

/// Runs `git -C <root> log --oneline` and returns its standard output.
pub fn fetch_history(root: &Path, timeout: Option<Duration>) -> Result<String, RepoTextError> {
    HistoryFetcher::new(timeout).fetch(root)
}

/// Fetches history with the default git according to `policy`.
pub fn history_for(
    root: &Path,
    policy: HistoryPolicy,
    timeout: Option<Duration>,
) -> Result<Option<String>, RepoTextError> {
    HistoryFetcher::new(timeout).fetch_with_policy(root, policy)
}
