//! Cover image rewrite
//!
//! Points the `coverImage` field of documents at the URL mapped to their id.
//! Files are written only when the value actually changes.

use std::collections::BTreeMap;
use std::path::Path;

use super::{quoted_field_pattern, replace_in_header, write_file, Outcome, TransformReport};
use crate::config::FieldNames;
use crate::document::load_documents;
use crate::error::Result;

/// Text with the cover image set to `url`, or `None` without a quoted field
pub fn apply_cover_image(raw: &str, key: &str, url: &str) -> Result<Option<String>> {
    let pattern = quoted_field_pattern(key)?;
    Ok(replace_in_header(raw, &pattern, &format!("{}: \"{}\"", key, url)))
}

/// Rewrite cover images of documents in `dir` whose id is in `images`
pub fn rewrite_cover_images(
    dir: &Path,
    extensions: &[String],
    fields: &FieldNames,
    images: &BTreeMap<String, String>,
) -> Result<TransformReport> {
    let documents = load_documents(dir, extensions)?;
    let mut report = TransformReport::new("update-images");

    for document in &documents {
        let Some(url) = document
            .metadata
            .get_str(&fields.id)
            .and_then(|id| images.get(id.trim()))
        else {
            continue;
        };

        match apply_cover_image(&document.raw, &fields.cover_image, url)? {
            None => report.record(
                &document.file_name,
                Outcome::Skipped,
                format!("no quoted '{}' field", fields.cover_image),
            ),
            Some(updated) if updated == document.raw => {
                report.record(&document.file_name, Outcome::Unchanged, "image already current")
            }
            Some(updated) => {
                write_file(&document.path, &updated)?;
                report.record(&document.file_name, Outcome::Updated, format!("image set to {}", url));
            }
        }
    }

    Ok(report)
}
