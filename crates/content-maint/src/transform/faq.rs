//! FAQ injection
//!
//! Appends an `<FAQBox>` block to the end of selected articles. A document
//! that already mentions an FAQ (or already ends with the block) is left
//! alone, so repeated runs never duplicate the section.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use super::{ensure_dir, Outcome, TransformReport};
use crate::config::FaqSettings;
use crate::error::{ContentError, Result};

/// One question and its answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// A titled group of FAQ entries destined for one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqBlock {
    pub heading: String,
    #[serde(default)]
    pub entries: Vec<FaqEntry>,
}

impl FaqBlock {
    /// Markup appended to the article, consumed by the site's FAQ component
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("\n---\n\n");
        out.push_str(&format!("### {}\n\n", self.heading));
        out.push_str("<FAQBox\n  questions={[\n");

        let last = self.entries.len().saturating_sub(1);
        for (i, entry) in self.entries.iter().enumerate() {
            out.push_str("    {\n");
            out.push_str(&format!("      question: \"{}\",\n", js_string(&entry.question)));
            out.push_str(&format!("      answer: \"{}\"\n", js_string(&entry.answer)));
            out.push_str(if i == last { "    }\n" } else { "    },\n" });
        }

        out.push_str("  ]}\n/>\n");
        out
    }
}

fn js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Whether the text already carries an FAQ section
pub fn has_faq(raw: &str, markers: &[String], markup: &str) -> bool {
    markers.iter().any(|m| raw.contains(m.as_str())) || raw.ends_with(markup)
}

/// Text after injection, or `None` when the guard trips
pub fn apply_faq(raw: &str, block: &FaqBlock, markers: &[String]) -> Option<String> {
    let markup = block.render();
    if has_faq(raw, markers, &markup) {
        return None;
    }
    Some(format!("{}{}", raw, markup))
}

/// Inject the configured FAQ blocks into the articles in `dir`
pub fn inject_faqs(dir: &Path, settings: &FaqSettings) -> Result<TransformReport> {
    inject_blocks(dir, &settings.blocks, &settings.guard_markers)
}

pub fn inject_blocks(
    dir: &Path,
    blocks: &BTreeMap<String, FaqBlock>,
    markers: &[String],
) -> Result<TransformReport> {
    ensure_dir(dir)?;
    let mut report = TransformReport::new("inject-faqs");

    for (file, block) in blocks {
        let path = dir.join(file);
        if !path.is_file() {
            report.record(file, Outcome::NotFound, "file not found");
            continue;
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| ContentError::io_at(&path, e))?;
        let Some(updated) = apply_faq(&raw, block, markers) else {
            report.record(file, Outcome::AlreadyApplied, "FAQ already exists");
            continue;
        };

        // append only the new tail; the existing bytes are never rewritten
        let mut handle = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| ContentError::io_at(&path, e))?;
        handle
            .write_all(updated[raw.len()..].as_bytes())
            .map_err(|e| ContentError::io_at(&path, e))?;

        report.record(
            file,
            Outcome::Updated,
            format!("FAQ added ({} questions)", block.entries.len()),
        );
    }

    Ok(report)
}
