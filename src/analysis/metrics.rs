// Size and line metrics for scanned files

use serde::{Deserialize, Serialize};

/// Metadata for one scanned file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    /// Content length in bytes
    pub size: usize,
    /// Number of `\n`-delimited segments
    pub lines: usize,
}

impl FileRecord {
    /// Build a record from file content
    pub fn from_content(path: impl Into<String>, content: &str) -> Self {
        Self {
            path: path.into(),
            size: content.len(),
            lines: line_count(content),
        }
    }
}

/// Count line-break-delimited segments.
///
/// An empty file counts as one line and a trailing newline adds an empty
/// final segment, so `"a\n"` has two.
pub fn line_count(content: &str) -> usize {
    content.split('\n').count()
}

/// Aggregate statistics over every scanned file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_bytes: usize,
    /// Mean byte size rounded half-up; 0 when there are no files
    pub average_size: usize,
}

impl ProjectStats {
    pub fn from_files(files: &[FileRecord]) -> Self {
        let total_files = files.len();
        let total_lines = files.iter().map(|f| f.lines).sum();
        let total_bytes: usize = files.iter().map(|f| f.size).sum();
        let average_size = if total_files == 0 {
            0
        } else {
            (total_bytes + total_files / 2) / total_files
        };

        Self {
            total_files,
            total_lines,
            total_bytes,
            average_size,
        }
    }
}
