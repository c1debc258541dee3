//! Title rewrite
//!
//! Replaces the quoted title of selected articles with a new literal. Only
//! the first `title: "..."` line of the front matter changes.

use std::collections::BTreeMap;
use std::path::Path;

use super::{ensure_dir, quoted_field_pattern, replace_in_header, write_file, Outcome, TransformReport};
use crate::error::{ContentError, Result};

/// Text with the title replaced, or `None` when there is no quoted title
pub fn apply_title(raw: &str, key: &str, title: &str) -> Result<Option<String>> {
    let pattern = quoted_field_pattern(key)?;
    Ok(replace_in_header(raw, &pattern, &format!("{}: \"{}\"", key, title)))
}

/// Rewrite the titles of the mapped files in `dir`
pub fn rewrite_titles(
    dir: &Path,
    titles: &BTreeMap<String, String>,
    key: &str,
) -> Result<TransformReport> {
    ensure_dir(dir)?;
    let mut report = TransformReport::new("fix-titles");

    for (file, title) in titles {
        let path = dir.join(file);
        if !path.is_file() {
            report.record(file, Outcome::NotFound, "file not found");
            continue;
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| ContentError::io_at(&path, e))?;
        match apply_title(&raw, key, title)? {
            None => report.record(file, Outcome::Skipped, format!("no quoted '{}' field", key)),
            Some(updated) if updated == raw => {
                report.record(file, Outcome::Unchanged, "title already up to date")
            }
            Some(updated) => {
                write_file(&path, &updated)?;
                report.record(file, Outcome::Updated, format!("title set to \"{}\"", title));
            }
        }
    }

    Ok(report)
}
