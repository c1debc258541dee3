//! Front matter rules
//!
//! Presence and length checks for the fields search engines show directly:
//! the title, the short description and the cover image.

use super::{char_len, AuditFinding, Rule, RuleCategory, RuleContext, Severity};
use crate::document::ContentDocument;

/// Required field that may also have a soft length limit
pub struct FieldRule {
    presence_id: String,
    length_id: String,
    /// Metadata key to read
    key: String,
    /// Label used in messages
    label: String,
    max_chars: Option<usize>,
}

impl FieldRule {
    pub fn new(rule_prefix: &str, key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            presence_id: format!("{}-present", rule_prefix),
            length_id: format!("{}-length", rule_prefix),
            key: key.into(),
            label: label.into(),
            max_chars: None,
        }
    }

    /// Warn when the value is longer than `max` characters
    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    /// Title: required, ideally at most `max` characters
    pub fn title(key: impl Into<String>, max: usize) -> Self {
        Self::new("title", key, "Title").with_max_chars(max)
    }

    /// Meta description: required, ideally at most `max` characters
    pub fn description(key: impl Into<String>, max: usize) -> Self {
        Self::new("description", key, "Meta description").with_max_chars(max)
    }

    /// Cover image: required
    pub fn cover_image(key: impl Into<String>) -> Self {
        Self::new("cover-image", key, "Cover image")
    }
}

impl Rule for FieldRule {
    fn id(&self) -> &str {
        &self.presence_id
    }

    fn description(&self) -> &str {
        "Checks a front matter field is present and within its length limit"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Metadata
    }

    fn evaluate(&self, document: &ContentDocument, _context: &RuleContext) -> Vec<AuditFinding> {
        let value = document
            .metadata
            .get_str(&self.key)
            .filter(|v| !v.trim().is_empty());

        let Some(value) = value else {
            return vec![AuditFinding::new(
                &self.presence_id,
                RuleCategory::Metadata,
                Severity::Error,
                format!("{} ({}) is missing from the front matter", self.label, self.key),
                &document.file_name,
            )
            .with_field(&self.key)
            .with_suggestion(format!("Add a '{}' field", self.key))];
        };

        match self.max_chars {
            Some(max) if char_len(&value) > max => vec![AuditFinding::new(
                &self.length_id,
                RuleCategory::Metadata,
                Severity::Warning,
                format!(
                    "{} is too long ({} chars, ideally at most {})",
                    self.label,
                    char_len(&value),
                    max
                ),
                &document.file_name,
            )
            .with_field(&self.key)],
            _ => Vec::new(),
        }
    }
}
