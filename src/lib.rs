//! repodocs - Generate documentation from a repository
//!
//! Scans a source tree, asks a text-generation service to summarize a
//! sample of files, groups recent commits into a changelog and draws a
//! Mermaid dependency diagram from the imports it finds.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod history;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod progress;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result, Stage};
pub use pipeline::{GenerationReport, Pipeline};
