//! Reads a single file into report content.

use crate::error::RepoTextError;
use crate::options::BinaryDetection;
use crate::types::FileContent;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Number of leading bytes inspected for binary content.
pub const PROBE_SIZE: u64 = 512;

/// Reads `path` as text, or returns [`FileContent::Binary`] when the probe
/// looks binary.
///
/// Text is rebuilt line by line with a single `\n` after each line, so CRLF
/// endings are normalized and a missing final newline is added.
///
/// # Errors
///
/// Returns [`RepoTextError::Read`] if the file cannot be opened or read, or if
/// a line is not valid UTF-8.
pub fn read_file_content(
    path: &Path,
    binary_detection: BinaryDetection,
) -> Result<FileContent, RepoTextError> {
    let mut file = File::open(path).map_err(|e| RepoTextError::read(path, e))?;
    let mut probe = Vec::with_capacity(PROBE_SIZE as usize);
    (&mut file)
        .take(PROBE_SIZE)
        .read_to_end(&mut probe)
        .map_err(|e| RepoTextError::read(path, e))?;
    let is_binary = match binary_detection {
        BinaryDetection::Simple => probe.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&probe).is_binary(),
        BinaryDetection::None => false,
    };
    if is_binary {
        tracing::debug!("Binary file detected: {}", path.display());
        return Ok(FileContent::Binary);
    }
    file.seek(SeekFrom::Start(0))
        .map_err(|e| RepoTextError::read(path, e))?;
    let mut content = String::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| RepoTextError::read(path, e))?;
        content.push_str(&line);
        content.push('\n');
    }
    Ok(FileContent::Text(content))
}
