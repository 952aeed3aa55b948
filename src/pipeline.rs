// Documentation pipeline
//
// scan -> analyze -> (api docs | changelog | architecture) -> write
//
// The three renderers run concurrently on the current task and are joined
// before anything touches the output directory, so a renderer failure
// leaves no documents behind.

use crate::analysis::{Analyzer, FileScanner};
use crate::config::Config;
use crate::error::{Result, Stage};
use crate::history::CommitSource;
use crate::llm::TextGenerator;
use crate::output::{
    ApiDocGenerator, ChangelogGenerator, DiagramGenerator, Documents, TemplateEngine,
};
use crate::progress::Progress;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    /// Paths of the written documents, in write order
    pub written: Vec<PathBuf>,
    pub files_scanned: usize,
    pub documents: Documents,
}

impl GenerationReport {
    /// One-line success text
    pub fn summary(&self) -> String {
        format!(
            "Documentation generated: {} files scanned, {} documents written",
            self.files_scanned,
            self.written.len()
        )
    }
}

/// Orchestrates a full documentation run over one repository
pub struct Pipeline {
    root: PathBuf,
    output_dir: PathBuf,
    config: Config,
    history: Arc<dyn CommitSource>,
    generator: Arc<dyn TextGenerator>,
    engine: TemplateEngine,
    progress: Progress,
}

impl Pipeline {
    /// Fails only if the bundled templates do not compile
    pub fn new(
        root: impl Into<PathBuf>,
        config: Config,
        history: Arc<dyn CommitSource>,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self> {
        let root = root.into();
        let output_dir = config.output_dir(&root);
        Ok(Self {
            root,
            output_dir,
            config,
            history,
            generator,
            engine: TemplateEngine::new()?,
            progress: Progress::hidden(),
        })
    }

    /// Override the output directory taken from the config
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run every stage. The first failure aborts the run, tagged with its stage.
    pub async fn run(&self) -> Result<GenerationReport> {
        let engine = &self.engine;
        let files = self
            .tracked(
                Stage::Scan,
                "Scanning files",
                async {
                    FileScanner::new(&self.config.scan).and_then(|scanner| scanner.scan(&self.root))
                },
                |files| format!("Scanned {} files", files.len()),
            )
            .await?;
        tracing::info!(root = %self.root.display(), files = files.len(), "scan complete");

        let structure = self
            .tracked(
                Stage::Analyze,
                "Analyzing structure",
                Analyzer::new(&self.root).analyze(&files),
                |s| format!("Analyzed {} files, {} with imports", s.files.len(), s.imports.len()),
            )
            .await?;

        let api = ApiDocGenerator::new(&self.root, Arc::clone(&self.generator), &self.config.docs);
        let changelog = ChangelogGenerator::new(Arc::clone(&self.history), &self.config.history);
        let diagram = DiagramGenerator::from_config(&self.config.diagram);

        let (api, changelog, architecture) = tokio::try_join!(
            self.tracked(
                Stage::ApiDocs,
                "Generating API documentation",
                api.generate(&files, engine),
                |_| format!("API documentation for {} files", api.sample(&files).len()),
            ),
            self.tracked(
                Stage::Changelog,
                "Generating changelog",
                changelog.generate(engine),
                |_| "Changelog generated".to_string(),
            ),
            self.tracked(
                Stage::Architecture,
                "Generating architecture diagram",
                async { diagram.generate(&structure, engine) },
                |_| "Architecture diagram generated".to_string(),
            ),
        )?;

        let documents = Documents {
            api,
            changelog,
            architecture,
        };

        let written = self
            .tracked(
                Stage::Write,
                "Writing documents",
                documents.write_to(&self.output_dir),
                |paths| format!("Wrote {} documents", paths.len()),
            )
            .await?;
        tracing::info!(output = %self.output_dir.display(), "documents written");

        Ok(GenerationReport {
            output_dir: self.output_dir.clone(),
            written,
            files_scanned: files.len(),
            documents,
        })
    }

    /// Await one stage behind a spinner and tag any failure with the stage
    async fn tracked<T, F>(
        &self,
        stage: Stage,
        message: &str,
        work: F,
        done: impl FnOnce(&T) -> String,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let spinner = self.progress.start(message);

        match work.await {
            Ok(value) => {
                spinner.succeed(done(&value));
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(%stage, error = %e, "stage failed");
                spinner.fail(format!("{} failed", message));
                Err(e.in_stage(stage))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::history::CommitEntry;
    use crate::output::{API_FILE, ARCHITECTURE_FILE, CHANGELOG_FILE};
    use async_trait::async_trait;
    use std::fs;
    use tempfile::TempDir;

    struct OneCommit;

    #[async_trait]
    impl CommitSource for OneCommit {
        async fn recent_commits(&self, _limit: usize) -> Result<Vec<CommitEntry>> {
            Ok(vec![CommitEntry::new("0123456789abcdef", "feat: add feature")])
        }
    }

    struct NoRepository;

    #[async_trait]
    impl CommitSource for NoRepository {
        async fn recent_commits(&self, _limit: usize) -> Result<Vec<CommitEntry>> {
            Err(Error::history("not a git repository"))
        }
    }

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok("Generated summary".to_string())
        }
    }

    struct Unavailable;

    #[async_trait]
    impl TextGenerator for Unavailable {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(Error::llm("service unavailable"))
        }
    }

    fn sample_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "import { b } from './b';\n").unwrap();
        fs::write(dir.path().join("b.js"), "import { c } from \"./c\";\n").unwrap();
        fs::write(dir.path().join("c.js"), "export const c = 1;\n").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_run_writes_three_documents() {
        let repo = sample_repo();
        let pipeline = Pipeline::new(
            repo.path(),
            Config::default(),
            Arc::new(OneCommit),
            Arc::new(Echo),
        )
        .unwrap();

        let report = pipeline.run().await.unwrap();

        assert_eq!(report.files_scanned, 3);
        assert_eq!(report.output_dir, repo.path().join("generated-docs"));
        assert_eq!(
            report.written,
            vec![
                report.output_dir.join(API_FILE),
                report.output_dir.join(CHANGELOG_FILE),
                report.output_dir.join(ARCHITECTURE_FILE),
            ]
        );
        assert!(report.documents.changelog.contains("## Features"));
        assert!(report.documents.architecture.contains("a_js --> __b"));
        assert_eq!(
            report.summary(),
            "Documentation generated: 3 files scanned, 3 documents written"
        );
    }

    #[tokio::test]
    async fn test_new_prepares_templates_before_any_stage() {
        let dir = TempDir::new().unwrap();
        let pipeline = Pipeline::new(
            dir.path().join("missing"),
            Config::default(),
            Arc::new(OneCommit),
            Arc::new(Echo),
        )
        .unwrap()
        .with_progress(Progress::hidden());

        // Only a scan failure is left once construction succeeds
        let err = pipeline.run().await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Scan));
        assert!(pipeline.engine.render_changelog(&[]).is_ok());
    }

    #[tokio::test]
    async fn test_output_dir_is_not_scanned_on_rerun() {
        let repo = sample_repo();
        let pipeline = Pipeline::new(
            repo.path(),
            Config::default(),
            Arc::new(OneCommit),
            Arc::new(Echo),
        )
        .unwrap();

        pipeline.run().await.unwrap();
        let report = pipeline.run().await.unwrap();

        assert_eq!(report.files_scanned, 3);
    }

    #[tokio::test]
    async fn test_generator_failure_writes_nothing() {
        let repo = sample_repo();
        let pipeline = Pipeline::new(
            repo.path(),
            Config::default(),
            Arc::new(OneCommit),
            Arc::new(Unavailable),
        )
        .unwrap();

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(err.stage(), Some(Stage::ApiDocs));
        assert!(matches!(err.root_cause(), Error::Llm(_)));
        assert!(!pipeline.output_dir().exists());
    }

    #[tokio::test]
    async fn test_history_failure_tagged_with_stage() {
        let repo = sample_repo();
        let pipeline = Pipeline::new(
            repo.path(),
            Config::default(),
            Arc::new(NoRepository),
            Arc::new(Echo),
        )
        .unwrap();

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Changelog));
        assert!(err.to_string().starts_with("changelog stage failed"));
        assert!(!pipeline.output_dir().exists());
    }

    #[tokio::test]
    async fn test_missing_root_fails_in_scan() {
        let dir = TempDir::new().unwrap();
        let pipeline = Pipeline::new(
            dir.path().join("missing"),
            Config::default(),
            Arc::new(OneCommit),
            Arc::new(Echo),
        )
        .unwrap();

        let err = pipeline.run().await.unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Scan));
        assert!(matches!(err.root_cause(), Error::Scan { .. }));
    }

    #[tokio::test]
    async fn test_with_output_dir() {
        let repo = sample_repo();
        let out = TempDir::new().unwrap();
        let pipeline = Pipeline::new(
            repo.path(),
            Config::default(),
            Arc::new(OneCommit),
            Arc::new(Echo),
        )
        .unwrap()
        .with_output_dir(out.path().join("docs"));

        let report = pipeline.run().await.unwrap();

        assert!(out.path().join("docs").join(API_FILE).exists());
        assert!(!repo.path().join("generated-docs").exists());
        assert_eq!(report.output_dir, out.path().join("docs"));
    }
}
