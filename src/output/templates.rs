// Template engine for the generated Markdown documents

use crate::analysis::ProjectStats;
use crate::error::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// One summarized file in the API reference
#[derive(Debug, Clone, Serialize)]
pub struct ApiEntry {
    pub path: String,
    pub body: String,
}

/// A changelog heading and its bullets
#[derive(Debug, Clone, Serialize)]
pub struct ChangelogSection {
    pub title: String,
    pub commits: Vec<ChangelogLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangelogLine {
    pub message: String,
    pub short_hash: String,
}

/// Tera wrapper holding the embedded document templates
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("api.md", include_str!("../../templates/api.md.tera")),
            ("changelog.md", include_str!("../../templates/changelog.md.tera")),
            ("architecture.md", include_str!("../../templates/architecture.md.tera")),
        ])?;

        Ok(Self { tera })
    }

    /// Render the API reference document
    pub fn render_api(&self, entries: &[ApiEntry]) -> Result<String> {
        let mut context = Context::new();
        context.insert("entries", entries);
        Ok(self.tera.render("api.md", &context)?)
    }

    /// Render the changelog; sections are expected to be non-empty
    pub fn render_changelog(&self, sections: &[ChangelogSection]) -> Result<String> {
        let mut context = Context::new();
        context.insert("sections", sections);
        Ok(self.tera.render("changelog.md", &context)?)
    }

    /// Render the architecture document around a Mermaid graph body
    pub fn render_architecture(&self, diagram: &str, stats: &ProjectStats) -> Result<String> {
        let mut context = Context::new();
        context.insert("diagram", diagram);
        context.insert("stats", stats);
        Ok(self.tera.render("architecture.md", &context)?)
    }
}
