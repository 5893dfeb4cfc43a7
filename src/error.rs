use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum RepoTextError {
    #[error("repository path {path} {reason}")]
    Path { path: PathBuf, reason: String },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("I/O error on {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write output file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to get Git history: {0}")]
    Run(String),
    #[error("git log did not finish within {0:?}")]
    HistoryTimeout(Duration),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
impl RepoTextError {
    pub(crate) fn path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        RepoTextError::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepoTextError::Read {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepoTextError::Write {
            path: path.into(),
            source,
        }
    }
    /// True for failures that come from the history fetch.
    pub fn is_history(&self) -> bool {
        matches!(
            self,
            RepoTextError::Run(_) | RepoTextError::HistoryTimeout(_)
        )
    }
}
