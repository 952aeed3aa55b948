// Output generation module

pub mod api;
pub mod changelog;
pub mod diagrams;
pub mod templates;

pub use api::*;
pub use changelog::*;
pub use diagrams::*;
pub use templates::*;

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub const API_FILE: &str = "api.md";
pub const CHANGELOG_FILE: &str = "changelog.md";
pub const ARCHITECTURE_FILE: &str = "architecture.md";

/// The three rendered Markdown documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documents {
    pub api: String,
    pub changelog: String,
    pub architecture: String,
}

impl Documents {
    /// File name and content pairs, in write order
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (API_FILE, self.api.as_str()),
            (CHANGELOG_FILE, self.changelog.as_str()),
            (ARCHITECTURE_FILE, self.architecture.as_str()),
        ]
    }

    /// Write every document under `dir`, creating it if absent.
    ///
    /// Files already written stay in place if a later write fails.
    pub async fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| Error::write(dir, e))?;

        let mut written = Vec::with_capacity(3);
        for (name, content) in self.files() {
            let path = dir.join(name);
            tokio::fs::write(&path, content)
                .await
                .map_err(|e| Error::write(&path, e))?;
            tracing::debug!(path = %path.display(), bytes = content.len(), "wrote document");
            written.push(path);
        }

        Ok(written)
    }
}
