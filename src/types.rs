use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;

/// Text substituted for the content of a file detected as binary.
pub const BINARY_PLACEHOLDER: &str = "[Binary file content omitted]";

/// What the report shows for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum FileContent {
    /// Decoded text, one `\n` after every line.
    Text(String),
    /// The probe found binary data; nothing else was read.
    Binary,
    /// The file could not be opened or decoded. Holds the error message.
    Unreadable(String),
}

impl FileContent {
    /// The content as it appears in a report.
    pub fn rendered(&self) -> Cow<'_, str> {
        match self {
            FileContent::Text(text) => Cow::Borrowed(text),
            FileContent::Binary => Cow::Borrowed(BINARY_PLACEHOLDER),
            FileContent::Unreadable(msg) => Cow::Owned(format!("[Error reading file: {}]", msg)),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, FileContent::Binary)
    }
}

/// A single file emitted by the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scanned root.
    pub path: PathBuf,
    /// The decoded content or a placeholder.
    pub content: FileContent,
}

/// The complete result of a scan.
#[derive(Debug, Serialize, Deserialize)]
pub struct RepoSnapshot {
    /// The root that was scanned, as given.
    pub root: PathBuf,
    /// Every surviving file, in walk order.
    pub files: Vec<FileRecord>,
    /// Output of `git log --oneline`, when it was fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
}
