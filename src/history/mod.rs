// Commit history grouping
//
// Buckets recent commits into features, fixes and everything else using a
// first-match keyword rule on the lower-cased message.

pub mod git;

pub use git::GitLog;

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Length of the abbreviated hash shown in the changelog
pub const SHORT_HASH_LEN: usize = 7;

/// One commit as read from version control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitEntry {
    pub hash: String,
    pub message: String,
}

impl CommitEntry {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(SHORT_HASH_LEN) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

/// Changelog bucket a commit falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitCategory {
    Feature,
    Fix,
    Other,
}

impl CommitCategory {
    /// Classify a commit message. Feature keywords win over fix keywords.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("feat") || lower.contains("add") {
            CommitCategory::Feature
        } else if lower.contains("fix") || lower.contains("bug") {
            CommitCategory::Fix
        } else {
            CommitCategory::Other
        }
    }
}

/// Commits partitioned by category, each group in the original order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitGroups {
    pub features: Vec<CommitEntry>,
    pub fixes: Vec<CommitEntry>,
    pub other: Vec<CommitEntry>,
}

impl CommitGroups {
    pub fn from_commits(commits: impl IntoIterator<Item = CommitEntry>) -> Self {
        let mut groups = Self::default();
        for commit in commits {
            match CommitCategory::classify(&commit.message) {
                CommitCategory::Feature => groups.features.push(commit),
                CommitCategory::Fix => groups.fixes.push(commit),
                CommitCategory::Other => groups.other.push(commit),
            }
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.features.len() + self.fixes.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source of recent commits, newest first
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Read at most `limit` commits.
    ///
    /// Fails with a history error when the target is not a repository or has
    /// no commits.
    async fn recent_commits(&self, limit: usize) -> Result<Vec<CommitEntry>>;
}
