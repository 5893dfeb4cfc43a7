//! # Repotext
//!
//! `repotext` flattens a local repository into a single text report. It walks the
//! directory tree in a stable order, skips the `.git` directory and anything matched
//! by the root's `.gitignore`, reads each file as newline-normalized text (binary files
//! get a placeholder), and appends the output of `git log --oneline`.
//!
//! [`scan`] produces a [`RepoSnapshot`] in memory; [`convert`] scans and writes the
//! report to the configured output file.
//!
//! # Example
//!
//! ```no_run
//! use repotext::{HistoryPolicy, RepoTextBuilder, convert};
//!
//! let options = RepoTextBuilder::new(".")
//!     .output("repo_contents.txt")
//!     .ignore_patterns(vec!["target/".into()])
//!     .history(HistoryPolicy::BestEffort)
//!     .build();
//!
//! let written = convert(&options).expect("Failed to convert repository");
//! println!("Repository contents saved to {}", written.display());
//! ```

mod content;
mod engine;
mod error;
mod history;
mod options;
pub mod output;
mod patterns;
mod tree;
mod types;

pub use content::{PROBE_SIZE, read_file_content};
pub use engine::{VCS_DIR, collect_records, convert, load_patterns, scan};
pub use error::RepoTextError;
pub use history::{DEFAULT_GIT_PROGRAM, HistoryFetcher, fetch_history, history_for};
pub use options::{
    BinaryDetection, DEFAULT_HISTORY_TIMEOUT, DEFAULT_IGNORE_FILE, DEFAULT_OUTPUT,
    HistoryPolicy, RepoTextBuilder, RepoTextOptions,
};
pub use output::{ReportFormat, format_report, write_report, write_report_to_file};
pub use patterns::{IgnorePatterns, load_ignore_file};
pub use types::{BINARY_PLACEHOLDER, FileContent, FileRecord, RepoSnapshot};
