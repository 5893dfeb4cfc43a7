use crate::history::DEFAULT_GIT_PROGRAM;
use crate::output::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default name of the report written by [`crate::convert`].
pub const DEFAULT_OUTPUT: &str = "repo_contents.txt";
/// Default ignore-spec file looked up at the root.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";
/// Default limit for the `git log` subprocess.
pub const DEFAULT_HISTORY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    /// Null byte within the first 512 bytes.
    Simple,
    /// `content_inspector` over the same probe.
    Accurate,
    None,
}

/// What happens when the history fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryPolicy {
    /// A failed fetch aborts the whole run.
    Required,
    /// A failed fetch is logged and the history section is left out.
    BestEffort,
    /// Never run git.
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoTextOptions {
    pub root: PathBuf,
    pub output: PathBuf,
    pub format: ReportFormat,
    /// Ignore-spec file name relative to the root; `None` disables it.
    pub ignore_file: Option<String>,
    pub ignore_patterns: Vec<String>,
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub binary_detection: BinaryDetection,
    pub history: HistoryPolicy,
    pub history_timeout: Option<Duration>,
    /// Git executable used for the history section.
    pub git_program: PathBuf,
}
impl Default for RepoTextOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ReportFormat::Text,
            ignore_file: Some(DEFAULT_IGNORE_FILE.to_string()),
            ignore_patterns: Vec::new(),
            max_depth: None,
            follow_links: false,
            binary_detection: BinaryDetection::Simple,
            history: HistoryPolicy::BestEffort,
            history_timeout: Some(DEFAULT_HISTORY_TIMEOUT),
            git_program: PathBuf::from(DEFAULT_GIT_PROGRAM),
        }
    }
}
#[derive(Debug, Default)]
pub struct RepoTextBuilder {
    options: RepoTextOptions,
}
impl RepoTextBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: RepoTextOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = path.into();
        self
    }
    pub fn format(mut self, format: ReportFormat) -> Self {
        self.options.format = format;
        self
    }
    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.options.ignore_file = Some(name.into());
        self
    }
    pub fn no_ignore_file(mut self) -> Self {
        self.options.ignore_file = None;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn history(mut self, policy: HistoryPolicy) -> Self {
        self.options.history = policy;
        self
    }
    pub fn history_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.options.history_timeout = timeout;
        self
    }
    pub fn git_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.options.git_program = program.into();
        self
    }
    pub fn build(self) -> RepoTextOptions {
        self.options
    }
}
