use crate::content::read_file_content;
use crate::error::RepoTextError;
use crate::history::HistoryFetcher;
use crate::options::RepoTextOptions;
use crate::output::write_report_to_file;
use crate::patterns::{IgnorePatterns, load_ignore_file};
use crate::types::{FileContent, FileRecord, RepoSnapshot};
use ignore::{DirEntry, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Version-control metadata directory, never descended into.
pub const VCS_DIR: &str = ".git";

struct Walker {
    inner: ignore::Walk,
    root: PathBuf,
    follow_links: bool,
}
impl Walker {
    fn new(
        root: &Path,
        options: &RepoTextOptions,
        patterns: IgnorePatterns,
        skip: Option<PathBuf>,
    ) -> Self {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .max_depth(options.max_depth)
            .follow_links(options.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));
        let prefix = root.to_path_buf();
        builder.filter_entry(move |entry| keep_entry(entry, &prefix, &patterns, skip.as_deref()));
        Self {
            inner: builder.build(),
            root: root.to_path_buf(),
            follow_links: options.follow_links,
        }
    }
    /// Paths of every regular file that survived filtering, in order.
    fn collect_files(self) -> Result<Vec<PathBuf>, RepoTextError> {
        let mut files = Vec::new();
        for result in self.inner {
            match result {
                Ok(entry) => {
                    if is_regular_file(&entry, self.follow_links) {
                        files.push(entry.into_path());
                    } else if !entry.file_type().is_some_and(|t| t.is_dir()) {
                        tracing::debug!("Skipping non-regular file: {}", entry.path().display());
                    }
                }
                Err(e) if e.depth().unwrap_or(0) == 0 => {
                    return Err(RepoTextError::Walk(format!(
                        "{}: {}",
                        self.root.display(),
                        e
                    )));
                }
                Err(e) => tracing::warn!("Skipping unreadable entry: {}", e),
            }
        }
        Ok(files)
    }
}

/// Regular files, plus symlinks to regular files when links are not
/// followed. FIFOs, sockets and devices never qualify.
fn is_regular_file(entry: &DirEntry, follow_links: bool) -> bool {
    match entry.file_type() {
        Some(t) if t.is_file() => true,
        Some(t) if t.is_symlink() && !follow_links => {
            fs::metadata(entry.path()).is_ok_and(|m| m.is_file())
        }
        _ => false,
    }
}

fn keep_entry(
    entry: &DirEntry,
    root: &Path,
    patterns: &IgnorePatterns,
    skip: Option<&Path>,
) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if entry.file_name() == VCS_DIR {
        return false;
    }
    if skip.is_some_and(|s| s == entry.path()) {
        tracing::debug!("Skipping report output: {}", entry.path().display());
        return false;
    }
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
    if patterns.is_match(relative, is_dir) {
        tracing::debug!("Ignored: {}", relative.display());
        return false;
    }
    true
}

/// Fails unless `root` exists and is a directory.
fn validate_root(root: &Path) -> Result<(), RepoTextError> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RepoTextError::path(root, "does not exist"));
        }
        Err(e) => return Err(RepoTextError::path(root, format!("is not accessible: {}", e))),
    };
    if !metadata.is_dir() {
        return Err(RepoTextError::path(root, "is not a directory"));
    }
    Ok(())
}

/// Absolute form of `output`, if it can be resolved. Used to keep a report
/// written under the root out of its own contents.
fn resolve_output(output: &Path) -> Option<PathBuf> {
    let name = output.file_name()?;
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|p| p.join(name))
}

/// Builds the ignore pattern set for a run: the root's ignore file first,
/// then any extra patterns from the options.
pub fn load_patterns(root: &Path, options: &RepoTextOptions) -> IgnorePatterns {
    let mut patterns = match &options.ignore_file {
        Some(name) => load_ignore_file(root, name),
        None => IgnorePatterns::new(),
    };
    patterns.extend(&options.ignore_patterns);
    patterns
}

/// Walks the root and reads every surviving file. History is not fetched.
///
/// # Errors
///
/// [`RepoTextError::Path`] for a missing or non-directory root and
/// [`RepoTextError::Walk`] when the root cannot be listed. Per-file read
/// failures are recorded as [`FileContent::Unreadable`].
pub fn collect_records(options: &RepoTextOptions) -> Result<Vec<FileRecord>, RepoTextError> {
    validate_root(&options.root)?;
    let root = fs::canonicalize(&options.root)
        .map_err(|e| RepoTextError::path(&options.root, format!("is not accessible: {}", e)))?;
    let patterns = load_patterns(&root, options);
    tracing::debug!(
        "Scanning {} with {} ignore patterns",
        root.display(),
        patterns.len()
    );
    let walker = Walker::new(&root, options, patterns, resolve_output(&options.output));
    let paths = walker.collect_files()?;
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let relative = path.strip_prefix(&root).unwrap_or(&path).to_path_buf();
        let content = match read_file_content(&path, options.binary_detection) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("{}", e);
                FileContent::Unreadable(read_error_message(e))
            }
        };
        files.push(FileRecord {
            path: relative,
            content,
        });
    }
    Ok(files)
}

fn read_error_message(error: RepoTextError) -> String {
    match error {
        RepoTextError::Read { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

/// Scans the root and fetches history according to the options.
pub fn scan(options: &RepoTextOptions) -> Result<RepoSnapshot, RepoTextError> {
    let files = collect_records(options)?;
    let history = HistoryFetcher::new(options.history_timeout)
        .program(&options.git_program)
        .fetch_with_policy(&options.root, options.history)?;
    tracing::info!(
        "Collected {} files from {}",
        files.len(),
        options.root.display()
    );
    Ok(RepoSnapshot {
        root: options.root.clone(),
        files,
        history,
    })
}

/// Scans the root and writes the report to `options.output`. Returns the
/// path written.
pub fn convert(options: &RepoTextOptions) -> Result<PathBuf, RepoTextError> {
    let snapshot = scan(options)?;
    write_report_to_file(&snapshot, options.format, &options.output)?;
    Ok(options.output.clone())
}
