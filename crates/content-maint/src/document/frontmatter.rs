//! Front matter handling
//!
//! Documents start with a YAML block fenced by `---` lines, followed by the
//! MDX body. Everything outside this module goes through [`parse`] and
//! [`serialize`]; transforms that edit a single field in place use
//! [`metadata_span`] to stay inside the header.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::ops::Range;

use crate::error::{ContentError, Result};

/// Fence line around the metadata block
pub const DELIMITER: &str = "---";

/// Ordered key/value header of a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(Mapping);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mapping(mapping: Mapping) -> Self {
        Self(mapping)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Scalar value rendered as a string.
    ///
    /// Numbers and booleans are stringified (`id: 102` reads as `"102"`);
    /// null, sequences and nested mappings read as absent.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => match &tagged.value {
                Value::String(s) => Some(s.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether the key holds a non-blank scalar
    pub fn has_value(&self, key: &str) -> bool {
        self.get_str(key)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(Value::String(key.into()), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().filter_map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw view of a document split at its metadata fences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text between the fences, if the document has a header
    pub header: Option<&'a str>,
    /// Everything after the closing fence (or the whole text)
    pub body: &'a str,
    /// Byte range of `header` within the original text
    pub span: Option<Range<usize>>,
}

/// Byte-order mark some editors put at the start of UTF-8 files
const BOM: char = '\u{FEFF}';

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(|c| c == '\r' || c == '\n') == DELIMITER
}

/// Split raw text into header and body without interpreting the header.
///
/// A header exists only when the very first line is a fence and a later
/// line closes it; anything else is treated as a header-less document.
pub fn split(raw: &str) -> Split<'_> {
    // offsets below stay relative to `raw`, BOM included
    let bom = if raw.starts_with(BOM) { BOM.len_utf8() } else { 0 };
    let plain = Split {
        header: None,
        body: &raw[bom..],
        span: None,
    };

    let mut lines = raw[bom..].split_inclusive('\n');
    let first = match lines.next() {
        Some(line) if is_delimiter(line) => line,
        _ => return plain,
    };

    let start = bom + first.len();
    let mut offset = start;
    for line in lines {
        if is_delimiter(line) {
            let end = offset;
            return Split {
                header: Some(&raw[start..end]),
                body: &raw[end + line.len()..],
                span: Some(start..end),
            };
        }
        offset += line.len();
    }

    plain
}

/// Byte range of the metadata block, excluding the fences
pub fn metadata_span(raw: &str) -> Option<Range<usize>> {
    split(raw).span
}

/// Parse a document, failing on a malformed header
pub fn try_parse(raw: &str) -> Result<(Metadata, String)> {
    let parts = split(raw);
    let metadata = match parts.header {
        None => Metadata::new(),
        Some(header) => match serde_yaml::from_str::<Value>(header)? {
            Value::Null => Metadata::new(),
            Value::Mapping(mapping) => Metadata::from_mapping(mapping),
            other => {
                return Err(ContentError::parse_error(format!(
                    "front matter must be a mapping, found {}",
                    value_kind(&other)
                )))
            }
        },
    };
    Ok((metadata, parts.body.to_string()))
}

/// Parse a document, reading a malformed header as empty metadata
pub fn parse(raw: &str) -> (Metadata, String) {
    match try_parse(raw) {
        Ok(parsed) => parsed,
        Err(_) => (Metadata::new(), split(raw).body.to_string()),
    }
}

/// Render metadata and body back into document text
pub fn serialize(metadata: &Metadata, body: &str) -> Result<String> {
    if metadata.is_empty() {
        return Ok(body.to_string());
    }
    let header = serde_yaml::to_string(metadata.as_mapping())
        .map_err(|e| ContentError::SerializationError(e.to_string()))?;
    Ok(format!("{DELIMITER}\n{header}{DELIMITER}\n{body}"))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
