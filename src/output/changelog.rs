// Changelog generation from commit history

use crate::config::HistoryConfig;
use crate::error::Result;
use crate::history::{CommitEntry, CommitGroups, CommitSource};
use crate::output::templates::{ChangelogLine, ChangelogSection, TemplateEngine};
use std::sync::Arc;

/// Reads recent commits and renders them as a grouped changelog
pub struct ChangelogGenerator {
    source: Arc<dyn CommitSource>,
    max_commits: usize,
    other_limit: usize,
}

impl ChangelogGenerator {
    pub fn new(source: Arc<dyn CommitSource>, config: &HistoryConfig) -> Self {
        Self {
            source,
            max_commits: config.max_commits,
            other_limit: config.other_limit,
        }
    }

    pub async fn generate(&self, engine: &TemplateEngine) -> Result<String> {
        let commits = self.source.recent_commits(self.max_commits).await?;
        let groups = CommitGroups::from_commits(commits);
        tracing::debug!(
            features = groups.features.len(),
            fixes = groups.fixes.len(),
            other = groups.other.len(),
            "grouped commits"
        );
        render_changelog(&groups, self.other_limit, engine)
    }
}

/// Render grouped commits in fixed section order, omitting empty sections.
///
/// Only the "Other Changes" section is truncated, after grouping.
pub fn render_changelog(
    groups: &CommitGroups,
    other_limit: usize,
    engine: &TemplateEngine,
) -> Result<String> {
    let candidates = [
        ("Features", groups.features.iter().collect::<Vec<_>>()),
        ("Bug Fixes", groups.fixes.iter().collect()),
        ("Other Changes", groups.other.iter().take(other_limit).collect()),
    ];

    let sections: Vec<ChangelogSection> = candidates
        .into_iter()
        .filter(|(_, commits)| !commits.is_empty())
        .map(|(title, commits)| ChangelogSection {
            title: title.to_string(),
            commits: commits.into_iter().map(changelog_line).collect(),
        })
        .collect();

    engine.render_changelog(&sections)
}

fn changelog_line(commit: &CommitEntry) -> ChangelogLine {
    ChangelogLine {
        message: commit.message.clone(),
        short_hash: commit.short_hash().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;

    struct FixedHistory(Vec<CommitEntry>);

    #[async_trait]
    impl CommitSource for FixedHistory {
        async fn recent_commits(&self, limit: usize) -> Result<Vec<CommitEntry>> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    struct NoRepository;

    #[async_trait]
    impl CommitSource for NoRepository {
        async fn recent_commits(&self, _limit: usize) -> Result<Vec<CommitEntry>> {
            Err(Error::history("not a git repository"))
        }
    }

    fn commit(n: usize, message: &str) -> CommitEntry {
        CommitEntry::new(format!("{:07x}deadbeef", n), message)
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let engine = TemplateEngine::new().unwrap();
        let groups = CommitGroups::from_commits(vec![
            commit(1, "chore: tidy"),
            commit(2, "fix: crash"),
            commit(3, "feat: login"),
        ]);
        let md = render_changelog(&groups, 10, &engine).unwrap();

        let features = md.find("## Features").unwrap();
        let fixes = md.find("## Bug Fixes").unwrap();
        let other = md.find("## Other Changes").unwrap();
        assert!(features < fixes && fixes < other);
        assert!(md.contains("- feat: login (0000003)"));
        assert!(md.contains("- fix: crash (0000002)"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let engine = TemplateEngine::new().unwrap();
        let groups = CommitGroups::from_commits(vec![commit(1, "feat: add feature")]);
        let md = render_changelog(&groups, 10, &engine).unwrap();

        assert!(md.contains("## Features"));
        assert!(!md.contains("## Bug Fixes"));
        assert!(!md.contains("## Other Changes"));
        assert_eq!(md.matches("\n- ").count(), 1);
    }

    #[test]
    fn test_other_section_truncated_after_grouping() {
        let engine = TemplateEngine::new().unwrap();
        let mut commits: Vec<CommitEntry> =
            (0..25).map(|i| commit(i, &format!("chore {i}"))).collect();
        commits.push(commit(99, "feat: last one"));
        let groups = CommitGroups::from_commits(commits);
        let md = render_changelog(&groups, 10, &engine).unwrap();

        let other = &md[md.find("## Other Changes").unwrap()..];
        assert_eq!(other.matches("\n- ").count(), 10);
        assert!(other.contains("- chore 9 "));
        assert!(!other.contains("- chore 10 "));
        assert!(md.contains("- feat: last one"));
    }

    #[tokio::test]
    async fn test_generate_respects_max_commits() {
        let engine = TemplateEngine::new().unwrap();
        let commits = (0..5).map(|i| commit(i, &format!("feat {i}"))).collect();
        let config = HistoryConfig {
            max_commits: 2,
            other_limit: 10,
        };
        let generator = ChangelogGenerator::new(Arc::new(FixedHistory(commits)), &config);
        let md = generator.generate(&engine).await.unwrap();

        assert!(md.contains("- feat 0 "));
        assert!(md.contains("- feat 1 "));
        assert!(!md.contains("- feat 2 "));
    }

    #[tokio::test]
    async fn test_generate_propagates_history_error() {
        let engine = TemplateEngine::new().unwrap();
        let generator =
            ChangelogGenerator::new(Arc::new(NoRepository), &HistoryConfig::default());
        let result = generator.generate(&engine).await;
        assert!(matches!(result, Err(Error::History(_))));
    }
}
