//! Ignore-spec loading and matching.
//!
//! Lines follow gitignore syntax and are compiled with
//! [`ignore::gitignore::GitignoreBuilder`]: `#` comments, blank lines
//! skipped, leading `/` anchors to the root, trailing `/` matches only
//! directories, `!` re-includes, and the last matching line wins. Only the
//! root-level file is read.

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Ordered set of ignore patterns for one run. Paths are matched relative
/// to the scanned root.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    builder: GitignoreBuilder,
    matcher: Gitignore,
    sources: Vec<String>,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        let mut builder = GitignoreBuilder::new("");
        builder.allow_unclosed_class(false);
        Self {
            builder,
            matcher: Gitignore::empty(),
            sources: Vec::new(),
        }
    }
}

impl IgnorePatterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the contents of an ignore-spec file.
    pub fn parse(text: &str) -> Self {
        let mut patterns = Self::new();
        patterns.extend(text.lines());
        patterns
    }

    /// Appends patterns from raw lines. Blank, comment and invalid lines are
    /// skipped.
    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.sources.len();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.builder.add_line(None, line) {
                Ok(_) => {
                    tracing::debug!("Ignore pattern: {}", line);
                    self.sources.push(line.to_string());
                }
                Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", line, e),
            }
        }
        if self.sources.len() == before {
            return;
        }
        match self.builder.build() {
            Ok(matcher) => self.matcher = matcher,
            Err(e) => tracing::warn!("Could not compile ignore patterns: {}", e),
        }
    }

    /// The accepted lines, in order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// True when the last pattern matching the root-relative path ignores it.
    /// A matching `!` line keeps the path.
    pub fn is_match(&self, relative: &Path, is_dir: bool) -> bool {
        match self.matcher.matched(relative, is_dir) {
            Match::Ignore(_) => true,
            Match::Whitelist(glob) => {
                tracing::debug!(
                    "Kept by '{}': {}",
                    glob.original(),
                    relative.display()
                );
                false
            }
            Match::None => false,
        }
    }
}

/// Loads `file_name` from `root`. A missing or unreadable file gives an
/// empty set.
pub fn load_ignore_file(root: &Path, file_name: &str) -> IgnorePatterns {
    let path = root.join(file_name);
    match fs::read_to_string(&path) {
        Ok(text) => IgnorePatterns::parse(&text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No ignore file at {}", path.display());
            IgnorePatterns::new()
        }
        Err(e) => {
            tracing::warn!("Could not read ignore file {}: {}", path.display(), e);
            IgnorePatterns::new()
        }
    }
}
