//! Internal module for rendering the emitted file paths as a tree.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Builds a visual tree string from a root directory and root-relative file
/// paths.
///
/// Intermediate directories are derived from the paths and shown with a
/// trailing `/`. The output is similar to the `tree` command, using ASCII
/// characters.
pub(crate) fn build_tree_from_paths(root: &Path, files: &[&Path]) -> String {
    let mut dirs: BTreeSet<PathBuf> = BTreeSet::new();
    for file in files {
        let mut parent = file.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
    }

    let mut sorted: Vec<(&Path, bool)> = dirs
        .iter()
        .map(|d| (d.as_path(), true))
        .chain(files.iter().map(|f| (*f, false)))
        .collect();
    sorted.sort_by(|a, b| a.0.components().cmp(b.0.components()));
    sorted.dedup_by(|a, b| a.0 == b.0);

    let mut lines = Vec::with_capacity(sorted.len() + 1);
    lines.push(format!(".  # {}", root.display()));

    for (entry, is_dir) in sorted {
        let depth = entry.components().count();
        let prefix = "│   ".repeat(depth.saturating_sub(1)) + "├── ";
        let name = entry
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| entry.to_string_lossy());
        let suffix = if is_dir { "/" } else { "" };
        lines.push(format!("{}{}{}", prefix, name, suffix));
    }

    lines.join("\n")
}
