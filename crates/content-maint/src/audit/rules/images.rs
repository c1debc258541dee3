//! Image accessibility rule

use regex::Regex;
use std::sync::OnceLock;

use super::{char_len, AuditFinding, Rule, RuleCategory, RuleContext, Severity};
use crate::document::ContentDocument;

fn image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("valid image pattern"))
}

/// Checks alt text of `![alt](url)` images in the body.
///
/// Empty alt text is an error; alt text shorter than the minimum is a
/// warning. Every image is reported separately.
pub struct ImageAltRule {
    min_alt_chars: usize,
}

impl ImageAltRule {
    pub fn new(min_alt_chars: usize) -> Self {
        Self { min_alt_chars }
    }
}

impl Rule for ImageAltRule {
    fn id(&self) -> &str {
        "image-alt"
    }

    fn description(&self) -> &str {
        "Requires descriptive alt text on body images"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Accessibility
    }

    fn is_applicable(&self, _context: &RuleContext) -> bool {
        true
    }

    fn evaluate(&self, document: &ContentDocument, _context: &RuleContext) -> Vec<AuditFinding> {
        let mut findings = Vec::new();

        for captures in image_pattern().captures_iter(&document.body) {
            let alt = captures.get(1).map(|m| m.as_str()).unwrap_or("");
            let url = captures.get(2).map(|m| m.as_str()).unwrap_or("");

            if alt.trim().is_empty() {
                findings.push(
                    AuditFinding::new(
                        self.id(),
                        RuleCategory::Accessibility,
                        Severity::Error,
                        format!("Image without alt text: {}", url),
                        &document.file_name,
                    )
                    .with_suggestion("Describe the image in the brackets: ![description](url)"),
                );
            } else if char_len(alt) < self.min_alt_chars {
                findings.push(AuditFinding::new(
                    self.id(),
                    RuleCategory::Accessibility,
                    Severity::Warning,
                    format!("Alt text too short (\"{}\"): {}", alt, url),
                    &document.file_name,
                ));
            }
        }

        findings
    }
}
