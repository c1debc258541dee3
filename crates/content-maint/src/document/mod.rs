//! Document loading
//!
//! A content directory holds one article per file. Loading lists the
//! directory, keeps files with a recognized extension and parses each into
//! a [`ContentDocument`]. Only an unlistable directory fails the run; single
//! bad files are logged and tolerated.

pub mod frontmatter;

pub use frontmatter::{metadata_span, parse, serialize, try_parse, Metadata};

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ContentError, Result};

/// One article from the content directory
#[derive(Debug, Clone)]
pub struct ContentDocument {
    /// File name, used as the document's identity in reports
    pub file_name: String,
    /// Full path on disk
    pub path: PathBuf,
    /// Unmodified file text
    pub raw: String,
    /// Parsed front matter (empty when missing or malformed)
    pub metadata: Metadata,
    /// Text after the front matter
    pub body: String,
}

impl ContentDocument {
    /// Build a document from text already read from `path`
    pub fn from_raw(path: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        let path = path.into();
        let raw = raw.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let (metadata, body) = match frontmatter::try_parse(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(file = %file_name, error = %e, "Unreadable front matter, using empty metadata");
                (Metadata::new(), frontmatter::split(&raw).body.to_string())
            }
        };

        Self {
            file_name,
            path,
            raw,
            metadata,
            body,
        }
    }

    /// Read and parse a single file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ContentError::io_at(path, e))?;
        Ok(Self::from_raw(path, raw))
    }
}

/// Whether `path` carries one of the recognized extensions (case-insensitive)
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Load every recognized document in `dir`, sorted by file name
pub fn load_documents(dir: &Path, extensions: &[String]) -> Result<Vec<ContentDocument>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| ContentError::DirectoryNotFound(format!("{}: {}", dir.display(), e)))?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !has_extension(&path, extensions) {
            continue;
        }

        match ContentDocument::load(&path) {
            Ok(doc) => documents.push(doc),
            Err(e) => warn!(error = %e, "Skipping unreadable document"),
        }
    }

    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    debug!(dir = %dir.display(), count = documents.len(), "Loaded documents");
    Ok(documents)
}
