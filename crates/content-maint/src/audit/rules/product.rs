//! Structured product data rule
//!
//! Product reviews earn rich results only when the front matter carries the
//! product fields. Guides and comparisons are exempt.

use super::{AuditFinding, AuditProfile, Rule, RuleCategory, RuleContext, Severity};
use crate::document::ContentDocument;

pub struct ProductSchemaRule {
    id_key: String,
    fields: Vec<String>,
    guide_marker: String,
    product_id_len: usize,
}

impl ProductSchemaRule {
    pub fn new(
        id_key: impl Into<String>,
        fields: Vec<String>,
        guide_marker: impl Into<String>,
        product_id_len: usize,
    ) -> Self {
        Self {
            id_key: id_key.into(),
            fields,
            guide_marker: guide_marker.into(),
            product_id_len,
        }
    }

    /// Documents without an id, or with a short numeric-style id outside
    /// the guides, are treated as product reviews.
    fn looks_like_product_review(&self, document: &ContentDocument) -> bool {
        match document.metadata.get_str(&self.id_key) {
            None => true,
            Some(id) if id.trim().is_empty() => true,
            Some(id) => {
                id.chars().count() == self.product_id_len
                    && !document.file_name.contains(self.guide_marker.as_str())
            }
        }
    }
}

impl Rule for ProductSchemaRule {
    fn id(&self) -> &str {
        "product-schema"
    }

    fn description(&self) -> &str {
        "Expects rating, brand, model and price on product reviews"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::StructuredData
    }

    fn is_applicable(&self, context: &RuleContext) -> bool {
        context.profile == AuditProfile::Advanced
    }

    fn evaluate(&self, document: &ContentDocument, _context: &RuleContext) -> Vec<AuditFinding> {
        let missing: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| !document.metadata.has_value(f))
            .map(|f| f.as_str())
            .collect();

        if missing.is_empty() || !self.looks_like_product_review(document) {
            return Vec::new();
        }

        vec![AuditFinding::new(
            self.id(),
            RuleCategory::StructuredData,
            Severity::Warning,
            format!("Missing structured product data: {}", missing.join(", ")),
            &document.file_name,
        )
        .with_suggestion(format!("Add {} to the front matter", self.fields.join(", ")))]
    }
}
