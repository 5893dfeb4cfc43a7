//! Report rendering for repotext snapshots.
//!
//! The plain text layout is the default report. Markdown adds a directory
//! tree and fenced code blocks; JSON serializes the snapshot as-is.

use crate::error::RepoTextError;
use crate::tree::build_tree_from_paths;
use crate::types::RepoSnapshot;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Markdown,
    Json,
}

/// Formats the snapshot into a string.
pub fn format_report(
    snapshot: &RepoSnapshot,
    format: ReportFormat,
) -> Result<String, RepoTextError> {
    match format {
        ReportFormat::Text => Ok(format_text(snapshot)),
        ReportFormat::Markdown => Ok(format_markdown(snapshot)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
    }
}

/// Writes the formatted snapshot to `writer` and flushes it.
pub fn write_report<W: Write>(
    snapshot: &RepoSnapshot,
    format: ReportFormat,
    writer: &mut W,
) -> Result<(), RepoTextError> {
    let report = format_report(snapshot, format)?;
    writer
        .write_all(report.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| RepoTextError::write("<writer>", e))
}

/// Creates `path` and writes the report to it. Returns only after the data
/// has been flushed and synced to disk.
pub fn write_report_to_file(
    snapshot: &RepoSnapshot,
    format: ReportFormat,
    path: impl AsRef<Path>,
) -> Result<(), RepoTextError> {
    let path = path.as_ref();
    let report = format_report(snapshot, format)?;
    let file = File::create(path).map_err(|e| RepoTextError::write(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(report.as_bytes())
        .map_err(|e| RepoTextError::write(path, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| RepoTextError::write(path, e.into_error()))?;
    file.sync_all().map_err(|e| RepoTextError::write(path, e))?;
    tracing::debug!("Wrote {} bytes to {}", report.len(), path.display());
    Ok(())
}

// ----------------------- Internal formatting -----------------------

fn format_text(snapshot: &RepoSnapshot) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("# File Tree and Contents\n\n");
    for file in &snapshot.files {
        out.push_str(&format!("## {}\n", file.path.display()));
        out.push_str(&file.content.rendered());
        out.push('\n');
    }
    if let Some(history) = &snapshot.history {
        out.push_str("\n# Git History\n\n");
        out.push_str(history);
    }
    out
}

fn format_markdown(snapshot: &RepoSnapshot) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("# File Tree and Contents\n\n```text\n");
    let paths: Vec<&Path> = snapshot.files.iter().map(|f| f.path.as_path()).collect();
    out.push_str(&build_tree_from_paths(&snapshot.root, &paths));
    out.push_str("\n```\n\n");

    for file in &snapshot.files {
        let ext = file.path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let lang = if file.content.is_binary() {
            ""
        } else {
            language_from_extension(ext)
        };
        let content = file.content.rendered();

        out.push_str(&format!("## {}\n\n```{}\n", file.path.display(), lang));
        out.push_str(&content);
        if !content.ends_with('\n') { out.push('\n'); }
        out.push_str("```\n\n");
    }

    if let Some(history) = &snapshot.history {
        out.push_str("# Git History\n\n```text\n");
        out.push_str(history);
        if !history.is_empty() && !history.ends_with('\n') { out.push('\n'); }
        out.push_str("```\n");
    }
    out
}

fn language_from_extension(ext: &str) -> &'static str {
    match ext {
        "rs" => "rust", "toml" => "toml", "json" => "json", "md" | "markdown" => "markdown",
        "txt" => "text", "html" | "htm" => "html", "css" => "css", "js" => "javascript",
        "py" => "python", "sh" | "bash" => "bash", "yml" | "yaml" => "yaml", "xml" => "xml",
        "c" => "c", "cpp" | "cc" | "cxx" => "cpp", "h" => "c", "hpp" => "cpp",
        "go" => "go", "rb" => "ruby", "php" => "php", "swift" => "swift",
        "kt" | "kts" => "kotlin", "scala" => "scala", "dart" => "dart",
        _ => "",
    }
}
