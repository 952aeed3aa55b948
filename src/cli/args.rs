//! CLI argument parsing

use crate::config::{CliOverrides, LlmProvider};
use clap::Parser;
use std::path::PathBuf;

/// Generate API docs, a changelog and an architecture diagram for a repository
#[derive(Parser, Debug)]
#[command(name = "repodocs")]
#[command(about = "Generate API docs, a changelog and an architecture diagram for a repository")]
#[command(version)]
pub struct Args {
    /// Repository to document (defaults to the current directory)
    pub repo: Option<PathBuf>,

    /// Output directory (defaults to <REPO>/generated-docs)
    pub output: Option<PathBuf>,

    /// Config file path (defaults to <REPO>/repodocs.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Text generation provider (openai, ollama)
    #[arg(long, value_parser = parse_provider)]
    pub provider: Option<LlmProvider>,

    /// Model name passed to the provider
    #[arg(long)]
    pub model: Option<String>,

    /// Number of files summarized in the API reference
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Most recent commits read for the changelog
    #[arg(long)]
    pub max_commits: Option<usize>,

    /// Glob patterns to exclude (can be repeated)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Hide progress spinners
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Repository root, falling back to the working directory
    pub fn repo_root(&self) -> PathBuf {
        self.repo.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Config overrides carried by the command line
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output: self.output.clone(),
            exclude: self.exclude.clone(),
            provider: self.provider,
            model: self.model.clone(),
            sample_size: self.sample_size,
            max_commits: self.max_commits,
        }
    }
}

fn parse_provider(name: &str) -> Result<LlmProvider, String> {
    LlmProvider::from_name(name)
        .ok_or_else(|| format!("unknown provider '{name}' (expected openai or ollama)"))
}
