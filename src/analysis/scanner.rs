// Source file discovery
//
// Walks the repository root and collects the relative paths of files with a
// recognized extension, pruning excluded directories along the way.

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Enumerates candidate source files under a root directory
#[derive(Debug, Clone)]
pub struct FileScanner {
    extensions: Vec<String>,
    exclude_dirs: Vec<String>,
    exclude: Vec<glob::Pattern>,
}

impl FileScanner {
    /// Create a scanner from scan settings, compiling the exclude globs
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let exclude = config
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            extensions: config.extensions.clone(),
            exclude_dirs: config.exclude_dirs.clone(),
            exclude,
        })
    }

    /// Return relative, `/`-separated paths of every source file under `root`.
    ///
    /// Entries are visited in file-name order within each directory. Symlinks
    /// are followed and reported under their own path. Unreadable
    /// subdirectories, dangling links and link cycles are skipped with a
    /// warning; an unreadable root is an error.
    pub fn scan(&self, root: &Path) -> Result<Vec<String>> {
        std::fs::read_dir(root).map_err(|e| Error::scan(root, e.to_string()))?;

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if !self.has_source_extension(entry.path()) {
                continue;
            }

            let relative = relative_path(entry.path(), root);
            if self.exclude.iter().any(|p| p.matches(&relative)) {
                continue;
            }

            files.push(relative);
        }

        tracing::debug!(root = %root.display(), count = files.len(), "scan finished");
        Ok(files)
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.exclude_dirs.iter().any(|d| *d == name)
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(false, |ext| self.extensions.iter().any(|x| x == ext))
    }
}

/// Relative path with `/` separators regardless of platform
fn relative_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
