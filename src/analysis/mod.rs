// Analysis module: file discovery and structural metrics

pub mod imports;
pub mod metrics;
pub mod scanner;

pub use imports::*;
pub use metrics::*;
pub use scanner::*;

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result of analyzing the scanned files
#[derive(Debug, Clone, Default, Serialize)]
pub struct Structure {
    /// One record per scanned file, in scan order
    pub files: Vec<FileRecord>,
    /// Raw import targets per file
    pub imports: ImportIndex,
}

impl Structure {
    /// Aggregate statistics across every file
    pub fn stats(&self) -> ProjectStats {
        ProjectStats::from_files(&self.files)
    }
}

/// Reads scanned files and records their metrics and imports
pub struct Analyzer {
    root: PathBuf,
}

impl Analyzer {
    /// Create an analyzer resolving paths against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read every file in order, one at a time.
    ///
    /// The first file that cannot be read aborts the analysis. Invalid UTF-8
    /// is not a read failure.
    pub async fn analyze(&self, files: &[String]) -> Result<Structure> {
        let mut structure = Structure::default();

        for path in files {
            let full_path = self.root.join(path);
            let content = read_source(&full_path).await?;

            let record = FileRecord::from_content(path.as_str(), &content);
            tracing::debug!(path = %path, size = record.size, lines = record.lines, "analyzed file");

            structure.imports.insert(path.as_str(), extract_imports(&content));
            structure.files.push(record);
        }

        Ok(structure)
    }
}

/// Read a source file as text, replacing invalid UTF-8 sequences with U+FFFD.
///
/// Only I/O failures are errors.
pub async fn read_source(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::read(path, e))?;

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(e) => {
            tracing::debug!(path = %path.display(), "decoding non-UTF-8 file lossily");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
