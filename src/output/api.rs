// API reference generation
//
// Sends the leading scanned files to the text generator one at a time and
// stitches the answers into a single Markdown document.

use crate::analysis::read_source;
use crate::config::DocsConfig;
use crate::error::Result;
use crate::llm::TextGenerator;
use crate::output::templates::{ApiEntry, TemplateEngine};
use std::path::PathBuf;
use std::sync::Arc;

/// Generates API documentation for a bounded prefix of the file list
pub struct ApiDocGenerator {
    root: PathBuf,
    generator: Arc<dyn TextGenerator>,
    sample_size: usize,
    max_chars: usize,
}

impl ApiDocGenerator {
    pub fn new(
        root: impl Into<PathBuf>,
        generator: Arc<dyn TextGenerator>,
        config: &DocsConfig,
    ) -> Self {
        Self {
            root: root.into(),
            generator,
            sample_size: config.sample_size,
            max_chars: config.max_chars,
        }
    }

    /// The files that will be summarized: the first `sample_size`, in scan order
    pub fn sample<'a>(&self, files: &'a [String]) -> &'a [String] {
        &files[..files.len().min(self.sample_size)]
    }

    /// Summarize each sampled file sequentially and render the reference.
    ///
    /// Files are re-read from disk here. A failed read or generation call
    /// aborts the whole document.
    pub async fn generate(&self, files: &[String], engine: &TemplateEngine) -> Result<String> {
        let mut entries = Vec::new();

        for path in self.sample(files) {
            let full_path = self.root.join(path);
            let content = read_source(&full_path).await?;

            let prompt = build_prompt(path, &content, self.max_chars);
            tracing::debug!(path = %path, prompt_len = prompt.len(), "requesting summary");
            let body = self.generator.generate(&prompt).await?;

            entries.push(ApiEntry {
                path: path.clone(),
                body,
            });
        }

        engine.render_api(&entries)
    }
}

/// First `max_chars` characters of `content`
pub fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Instruction sent with each file
pub fn build_prompt(path: &str, content: &str, max_chars: usize) -> String {
    format!(
        "Write API documentation in Markdown for the source file below. Cover:\n\
        - What the file is for\n\
        - Its key functions and classes\n\
        - Parameters and return values\n\
        - Usage examples, when the code makes them clear\n\n\
        File: {}\n\
        ```\n\
        {}\n\
        ```\n\n\
        Respond with the Markdown only, without any preamble.",
        path,
        truncate_chars(content, max_chars)
    )
}
