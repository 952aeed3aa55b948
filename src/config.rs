use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up at the repository root
pub const CONFIG_FILE_NAME: &str = "repodocs.toml";

/// Output directory name used when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "generated-docs";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub history: HistoryConfig,
    pub docs: DocsConfig,
    pub diagram: DiagramConfig,
    pub llm: LlmConfig,
    pub output: OutputConfig,
}

/// File discovery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions (without the dot) that count as source files
    pub extensions: Vec<String>,
    /// Directory names pruned anywhere in the tree
    pub exclude_dirs: Vec<String>,
    /// Extra glob patterns matched against the relative path
    pub exclude: Vec<String>,
}

/// Changelog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_commits: usize,
    /// Entries kept in the "Other Changes" section
    pub other_limit: usize,
}

/// API reference settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Number of leading files sent for summarization
    pub sample_size: usize,
    /// Characters of each file included in the prompt
    pub max_chars: usize,
}

/// Architecture diagram settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub max_nodes: usize,
    pub max_edges: usize,
    pub max_edges_per_file: usize,
    /// Mermaid layout direction (TD, TB, LR, BT, RL)
    pub direction: String,
}

/// Text generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Defaults to `<repo>/generated-docs` when unset
    pub directory: Option<PathBuf>,
}

/// Text generation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAI,
    Ollama,
}

impl LlmProvider {
    /// Parse a provider name as given on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "openai" => Some(LlmProvider::OpenAI),
            "ollama" => Some(LlmProvider::Ollama),
            _ => None,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["js", "ts", "jsx", "tsx", "py", "java", "go", "rs"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_dirs: ["node_modules", "dist", "build", ".git"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude: vec![],
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_commits: 50,
            other_limit: 10,
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            sample_size: 5,
            max_chars: 3000,
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            max_nodes: 10,
            max_edges: 15,
            max_edges_per_file: 3,
            direction: "TD".to_string(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: "gpt-4o-mini".to_string(),
            api_url: None,
            api_key: None,
            max_tokens: 2000,
            timeout_secs: 120,
        }
    }
}

/// Secrets taken from the process environment
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    /// Issue tracker token; read for completeness, nothing in the pipeline uses it
    pub github_token: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: non_empty_env("OPENAI_API_KEY"),
            github_token: non_empty_env("GITHUB_TOKEN"),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// CLI overrides applied on top of the file config
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub provider: Option<LlmProvider>,
    pub model: Option<String>,
    pub sample_size: Option<usize>,
    pub max_commits: Option<usize>,
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file if it exists, otherwise return defaults.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, overrides: CliOverrides) {
        if let Some(out) = overrides.output {
            self.output.directory = Some(out);
        }

        if !overrides.exclude.is_empty() {
            self.scan.exclude.extend(overrides.exclude);
        }

        if let Some(provider) = overrides.provider {
            self.llm.provider = provider;
        }

        if let Some(model) = overrides.model {
            self.llm.model = model;
        }

        if let Some(k) = overrides.sample_size {
            self.docs.sample_size = k;
        }

        if let Some(n) = overrides.max_commits {
            self.history.max_commits = n;
        }
    }

    /// Output directory for a given repository root
    pub fn output_dir(&self, repo_root: &Path) -> PathBuf {
        self.output
            .directory
            .clone()
            .unwrap_or_else(|| repo_root.join(DEFAULT_OUTPUT_DIR))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.extensions.is_empty() {
            return Err(Error::config_validation("at least one extension required"));
        }

        if self.history.max_commits == 0 {
            return Err(Error::config_validation("max_commits must be at least 1"));
        }

        if self.docs.sample_size == 0 {
            return Err(Error::config_validation("sample_size must be at least 1"));
        }

        if self.docs.max_chars == 0 {
            return Err(Error::config_validation("max_chars must be at least 1"));
        }

        if self.diagram.max_nodes == 0 {
            return Err(Error::config_validation("diagram max_nodes must be at least 1"));
        }

        if !matches!(self.diagram.direction.as_str(), "TD" | "TB" | "LR" | "BT" | "RL") {
            return Err(Error::config_validation(format!(
                "unknown diagram direction: {}",
                self.diagram.direction
            )));
        }

        for pattern in &self.scan.exclude {
            glob::Pattern::new(pattern)?;
        }

        Ok(())
    }
}
