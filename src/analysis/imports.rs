// Import extraction
//
// Pattern-based detection of ES-style `import ... from '<target>'` statements.
// This is an approximation: multi-line imports, re-exports, `require` calls and
// non-JavaScript import syntaxes are not recognized. Targets are kept verbatim
// and never resolved to files.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static IMPORT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import .* from ['"](.+)['"]"#).expect("valid import regex"));

/// Every import target in `content`, in order of appearance
pub fn extract_imports(content: &str) -> Vec<String> {
    IMPORT_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// File path to raw import targets, kept in scan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportIndex {
    entries: Vec<(String, Vec<String>)>,
}

impl ImportIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the imports of a file. Files with no imports are not indexed.
    ///
    /// Appends without a lookup; each scanned path is inserted once.
    pub fn insert(&mut self, path: impl Into<String>, imports: Vec<String>) {
        if !imports.is_empty() {
            self.entries.push((path.into(), imports));
        }
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, imports)| imports.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(path, imports)| (path.as_str(), imports.as_slice()))
    }

    /// Number of files with at least one import
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_imports(&self) -> usize {
        self.entries.iter().map(|(_, imports)| imports.len()).sum()
    }
}
