//! Text transforms
//!
//! Each transform reads a document's raw text and rewrites it only when
//! something changes. Edits touch one front matter field or append one
//! guarded block; every other byte of the file is preserved. Running a
//! transform a second time is a no-op.

pub mod dates;
pub mod faq;
pub mod images;
pub mod title;

pub use dates::normalize_dates;
pub use faq::inject_faqs;
pub use images::rewrite_cover_images;
pub use title::rewrite_titles;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::document::metadata_span;
use crate::error::{ContentError, Result};

/// What a transform did to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// File was rewritten
    Updated,
    /// The guarded content is already present
    AlreadyApplied,
    /// Field already holds the target value or needs no change
    Unchanged,
    /// Mapped file does not exist
    NotFound,
    /// File lacks the field the transform edits
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Updated => write!(f, "updated"),
            Outcome::AlreadyApplied => write!(f, "already-applied"),
            Outcome::Unchanged => write!(f, "unchanged"),
            Outcome::NotFound => write!(f, "not-found"),
            Outcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// Outcome for one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub file: String,
    pub outcome: Outcome,
    pub detail: String,
}

/// Per-file outcomes of one transform run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformReport {
    pub transform: String,
    pub files: Vec<FileOutcome>,
}

impl TransformReport {
    pub fn new(transform: impl Into<String>) -> Self {
        Self {
            transform: transform.into(),
            files: Vec::new(),
        }
    }

    /// Record and log the decision taken for a file
    pub fn record(&mut self, file: impl Into<String>, outcome: Outcome, detail: impl Into<String>) {
        let file = file.into();
        let detail = detail.into();
        info!(
            transform = %self.transform,
            file = %file,
            outcome = %outcome,
            "{}",
            detail
        );
        self.files.push(FileOutcome {
            file,
            outcome,
            detail,
        });
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    pub fn outcome_of(&self, file: &str) -> Option<Outcome> {
        self.files.iter().find(|f| f.file == file).map(|f| f.outcome)
    }
}

/// Fail with `DirectoryNotFound` unless `dir` is a directory
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ContentError::DirectoryNotFound(dir.display().to_string()))
    }
}

/// Matches `key: "value"` at the start of a header line
pub(crate) fn quoted_field_pattern(key: &str) -> Result<Regex> {
    Regex::new(&format!(r#"(?m)^{}:[ \t]*"[^"\n]*""#, regex::escape(key)))
        .map_err(|e| ContentError::InternalError(format!("field pattern for '{}': {}", key, e)))
}

/// Replace the first match of `pattern` inside the metadata block.
///
/// Returns `None` when the document has no header or the header has no
/// match. The returned text may equal the input.
pub(crate) fn replace_in_header(raw: &str, pattern: &Regex, replacement: &str) -> Option<String> {
    let span = metadata_span(raw)?;
    let found = pattern.find(&raw[span.clone()])?;
    let start = span.start + found.start();
    let end = span.start + found.end();

    let mut updated = String::with_capacity(raw.len() + replacement.len());
    updated.push_str(&raw[..start]);
    updated.push_str(replacement);
    updated.push_str(&raw[end..]);
    Some(updated)
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| ContentError::io_at(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "---\ntitle: \"Velho\"\nseoTitle: \"x\"\n---\ntitle: \"no corpo\"\n";

    #[test]
    fn test_replace_in_header_touches_first_match_only() {
        let pattern = quoted_field_pattern("title").unwrap();
        let updated = replace_in_header(DOC, &pattern, "title: \"Novo\"").unwrap();
        assert_eq!(
            updated,
            "---\ntitle: \"Novo\"\nseoTitle: \"x\"\n---\ntitle: \"no corpo\"\n"
        );
    }

    #[test]
    fn test_replace_after_byte_order_mark() {
        let raw = format!("\u{FEFF}{}", DOC);
        let pattern = quoted_field_pattern("title").unwrap();
        let updated = replace_in_header(&raw, &pattern, "title: \"Novo\"").unwrap();
        assert_eq!(
            updated,
            "\u{FEFF}---\ntitle: \"Novo\"\nseoTitle: \"x\"\n---\ntitle: \"no corpo\"\n"
        );
    }

    #[test]
    fn test_replace_ignores_body_matches() {
        let raw = "---\nid: 1\n---\ntitle: \"no corpo\"\n";
        let pattern = quoted_field_pattern("title").unwrap();
        assert!(replace_in_header(raw, &pattern, "title: \"Novo\"").is_none());
    }

    #[test]
    fn test_field_pattern_is_anchored() {
        let pattern = quoted_field_pattern("title").unwrap();
        assert!(!pattern.is_match("seoTitle: \"a\""));
        assert!(!pattern.is_match("subtitle: \"a\""));
        assert!(pattern.is_match("title:  \"a\""));
    }

    #[test]
    fn test_report_counts() {
        let mut report = TransformReport::new("test");
        report.record("a.mdx", Outcome::Updated, "done");
        report.record("b.mdx", Outcome::NotFound, "missing");
        report.record("c.mdx", Outcome::Updated, "done");
        assert_eq!(report.count(Outcome::Updated), 2);
        assert_eq!(report.outcome_of("b.mdx"), Some(Outcome::NotFound));
        assert_eq!(report.outcome_of("z.mdx"), None);
    }

    #[test]
    fn test_outcome_serializes_kebab_case() {
        let json = serde_json::to_string(&Outcome::AlreadyApplied).unwrap();
        assert_eq!(json, "\"already-applied\"");
    }
}
