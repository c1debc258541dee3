//! Body rules
//!
//! Content depth, heading structure and FAQ coverage.

use regex::Regex;
use std::sync::OnceLock;

use super::{char_len, AuditFinding, Rule, RuleCategory, RuleContext, Severity};
use crate::document::ContentDocument;

/// Flags bodies shorter than the profile's depth threshold
pub struct ThinContentRule;

impl Rule for ThinContentRule {
    fn id(&self) -> &str {
        "thin-content"
    }

    fn description(&self) -> &str {
        "Warns when the body is too short to rank"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Content
    }

    fn evaluate(&self, document: &ContentDocument, context: &RuleContext) -> Vec<AuditFinding> {
        let length = char_len(&document.body);
        if length >= context.min_body_chars {
            return Vec::new();
        }

        vec![AuditFinding::new(
            self.id(),
            RuleCategory::Content,
            Severity::Warning,
            format!(
                "Thin content ({} chars, recommended at least {})",
                length, context.min_body_chars
            ),
            &document.file_name,
        )
        .with_suggestion("Expand the article with more depth and first-hand detail")]
    }
}

fn top_heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?m)^# ").expect("valid heading pattern"))
}

/// Flags a level-one heading in the body; the layout already renders the
/// title as the page's H1
pub struct RedundantHeadingRule;

impl Rule for RedundantHeadingRule {
    fn id(&self) -> &str {
        "redundant-heading"
    }

    fn description(&self) -> &str {
        "Rejects '# ' headings inside the body"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Content
    }

    fn evaluate(&self, document: &ContentDocument, _context: &RuleContext) -> Vec<AuditFinding> {
        if !top_heading_pattern().is_match(&document.body) {
            return Vec::new();
        }

        vec![AuditFinding::new(
            self.id(),
            RuleCategory::Content,
            Severity::Error,
            "Body contains a top-level '# ' heading; the front matter title is already the H1",
            &document.file_name,
        )
        .with_suggestion("Demote the heading to '## '")]
    }
}

/// Warns when the body has no recognizable FAQ section
pub struct FaqSectionRule {
    markers: Vec<String>,
}

impl FaqSectionRule {
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }
}

impl Rule for FaqSectionRule {
    fn id(&self) -> &str {
        "faq-section"
    }

    fn description(&self) -> &str {
        "Looks for an FAQ heading or component"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::AnswerEngine
    }

    fn evaluate(&self, document: &ContentDocument, _context: &RuleContext) -> Vec<AuditFinding> {
        if self.markers.iter().any(|m| document.body.contains(m.as_str())) {
            return Vec::new();
        }

        vec![AuditFinding::new(
            self.id(),
            RuleCategory::AnswerEngine,
            Severity::Warning,
            "No FAQ section; direct answers matter for answer engines and voice search",
            &document.file_name,
        )
        .with_suggestion("Add a '## Perguntas Frequentes' section or an <FAQBox> component")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::rules::AuditProfile;
    use crate::config::AuditSettings;

    fn doc(body: &str) -> ContentDocument {
        ContentDocument::from_raw("201-x.mdx", format!("---\ntitle: T\n---\n{}", body))
    }

    fn ctx() -> RuleContext {
        RuleContext::new(AuditProfile::Standard)
    }

    #[test]
    fn test_thin_content_threshold() {
        let short = ThinContentRule.evaluate(&doc(&"a".repeat(1499)), &ctx());
        assert_eq!(short.len(), 1);
        assert!(short[0].message.contains("1499 chars"));

        assert!(ThinContentRule.evaluate(&doc(&"a".repeat(1500)), &ctx()).is_empty());
    }

    #[test]
    fn test_thin_content_follows_context() {
        let body = "a".repeat(1800);
        assert!(ThinContentRule.evaluate(&doc(&body), &ctx()).is_empty());
        let advanced = RuleContext::new(AuditProfile::Advanced);
        assert_eq!(ThinContentRule.evaluate(&doc(&body), &advanced).len(), 1);
    }

    #[test]
    fn test_redundant_heading() {
        let findings = RedundantHeadingRule.evaluate(&doc("intro\n# Título\ntexto"), &ctx());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_lower_headings_are_fine() {
        assert!(RedundantHeadingRule
            .evaluate(&doc("## Seção\n### Sub\n#hashtag"), &ctx())
            .is_empty());
    }

    #[test]
    fn test_faq_markers() {
        let rule = FaqSectionRule::new(AuditSettings::default().faq_markers);
        assert_eq!(rule.evaluate(&doc("sem perguntas"), &ctx()).len(), 1);
        assert!(rule.evaluate(&doc("## FAQ\n- a"), &ctx()).is_empty());
        assert!(rule.evaluate(&doc("<FAQBox questions={[]} />"), &ctx()).is_empty());
        assert!(rule
            .evaluate(&doc("## Perguntas Frequentes\n"), &ctx())
            .is_empty());
    }
}
