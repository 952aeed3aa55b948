// Commit history read through the `git` CLI

use crate::error::{Error, Result};
use crate::history::{CommitEntry, CommitSource};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Separates hash and subject in the log format
const FIELD_SEP: char = '\u{1f}';

/// Reads history by shelling out to `git log`
pub struct GitLog {
    repo: PathBuf,
}

impl GitLog {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }
}

#[async_trait]
impl CommitSource for GitLog {
    async fn recent_commits(&self, limit: usize) -> Result<Vec<CommitEntry>> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(["log", "-n", &limit.to_string(), "--format=%H%x1f%s"])
            .output()
            .await
            .map_err(|e| Error::history(format!("failed to launch git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::history(format!(
                "git log failed in {}: {}",
                self.repo.display(),
                stderr.trim()
            )));
        }

        let commits = parse_log(&String::from_utf8_lossy(&output.stdout));
        if commits.is_empty() {
            return Err(Error::history(format!(
                "no commits found in {}",
                self.repo.display()
            )));
        }

        tracing::debug!(repo = %self.repo.display(), count = commits.len(), "read commit history");
        Ok(commits)
    }
}

/// Parse `<hash>\x1f<subject>` lines, skipping blanks
fn parse_log(stdout: &str) -> Vec<CommitEntry> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let (hash, message) = line.split_once(FIELD_SEP)?;
            Some(CommitEntry::new(hash.trim(), message))
        })
        .collect()
}
