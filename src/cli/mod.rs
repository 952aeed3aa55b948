//! CLI module for repodocs

mod args;

pub use args::Args;

use crate::config::{Config, Credentials, LlmProvider, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use crate::history::GitLog;
use crate::llm::generator_from_config;
use crate::pipeline::{GenerationReport, Pipeline};
use crate::progress::Progress;
use std::process::ExitCode;
use std::sync::Arc;

/// Run the CLI application
pub async fn run(args: Args) -> ExitCode {
    match execute(args).await {
        Ok(report) => {
            println!("{}", report.summary());
            println!("Output: {}", report.output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: Args) -> Result<GenerationReport> {
    let root = args.repo_root();
    if !root.exists() {
        return Err(Error::PathNotFound(root));
    }

    // An explicit config must exist; the default one is optional
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&root.join(CONFIG_FILE_NAME))?,
    };
    config.merge_cli(args.overrides());
    config.validate()?;

    let credentials = Credentials::from_env();
    if config.llm.provider == LlmProvider::OpenAI
        && config.llm.api_key.is_none()
        && credentials.openai_api_key.is_none()
    {
        tracing::warn!("OPENAI_API_KEY is not set; API documentation will fail");
    }
    tracing::debug!(
        provider = ?config.llm.provider,
        model = %config.llm.model,
        github_token = credentials.github_token.is_some(),
        "configuration loaded"
    );

    let generator = generator_from_config(&config.llm, &credentials)?;
    let history = Arc::new(GitLog::new(&root));

    let pipeline = Pipeline::new(&root, config, history, generator)?
        .with_progress(Progress::new(!args.quiet));

    if args.verbose {
        println!("Repository: {}", pipeline.root().display());
    }

    pipeline.run().await
}
