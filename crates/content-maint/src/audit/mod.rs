//! Audit engine
//!
//! Runs the registered rules over documents and aggregates the findings
//! into a per-document report with a run-level summary. Findings are never
//! fatal: every document is evaluated and reported.

pub mod rules;

pub use rules::{AuditFinding, AuditProfile, BoxedRule, Rule, RuleCategory, RuleContext, Severity};

use rules::{
    content::{FaqSectionRule, RedundantHeadingRule, ThinContentRule},
    images::ImageAltRule,
    metadata::FieldRule,
    product::ProductSchemaRule,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::MaintenanceConfig;
use crate::document::ContentDocument;

/// Findings for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    pub file: String,
    pub findings: Vec<AuditFinding>,
}

impl DocumentReport {
    pub fn errors(&self) -> impl Iterator<Item = &AuditFinding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &AuditFinding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }
}

/// Run-level counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub documents_scanned: usize,
    /// Documents with at least one finding
    pub documents_with_findings: usize,
    pub errors: usize,
    pub warnings: usize,
    pub by_category: BTreeMap<RuleCategory, usize>,
}

/// Result of auditing a set of documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub profile: AuditProfile,
    /// Only documents with findings
    pub documents: Vec<DocumentReport>,
    pub summary: AuditSummary,
    pub duration_ms: u64,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.documents.is_empty()
    }
}

/// The audit engine
pub struct AuditEngine {
    rules: Vec<Arc<dyn Rule>>,
    context: RuleContext,
}

impl AuditEngine {
    /// Engine with the default rules configured from `config`
    pub fn new(config: &MaintenanceConfig, profile: AuditProfile) -> Self {
        let mut context = RuleContext::new(profile);
        if let Some(min) = config.audit.min_body_chars {
            context = context.with_min_body_chars(min);
        }

        let mut engine = Self::empty(context);
        engine.register_default_rules(config);
        engine
    }

    /// Engine without rules
    pub fn empty(context: RuleContext) -> Self {
        Self {
            rules: Vec::new(),
            context,
        }
    }

    fn register_default_rules(&mut self, config: &MaintenanceConfig) {
        let fields = &config.fields;
        let audit = &config.audit;

        self.register(Arc::new(FieldRule::title(&fields.title, audit.title_max_chars)));
        self.register(Arc::new(FieldRule::description(
            &fields.description,
            audit.description_max_chars,
        )));
        self.register(Arc::new(FieldRule::cover_image(&fields.cover_image)));
        self.register(Arc::new(ThinContentRule));
        self.register(Arc::new(ImageAltRule::new(audit.min_alt_chars)));
        self.register(Arc::new(FaqSectionRule::new(audit.faq_markers.clone())));
        self.register(Arc::new(RedundantHeadingRule));
        self.register(Arc::new(ProductSchemaRule::new(
            &fields.id,
            fields.product.clone(),
            &audit.guide_marker,
            audit.product_id_len,
        )));
    }

    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn register_boxed(&mut self, rule: BoxedRule) {
        self.rules.push(Arc::from(rule));
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn context(&self) -> &RuleContext {
        &self.context
    }

    /// Rules that run under this engine's profile
    pub fn active_rules(&self) -> impl Iterator<Item = &Arc<dyn Rule>> {
        self.rules.iter().filter(|r| r.is_applicable(&self.context))
    }

    /// Audit one document.
    ///
    /// Deterministic: the same document always yields the same findings.
    pub fn audit(&self, document: &ContentDocument) -> Vec<AuditFinding> {
        let mut findings = Vec::new();
        for rule in self.active_rules() {
            let produced = rule.evaluate(document, &self.context);
            debug!(
                rule = rule.id(),
                file = %document.file_name,
                findings = produced.len(),
                "Rule evaluated"
            );
            findings.extend(produced);
        }
        findings
    }

    /// Audit every document and summarize
    pub fn audit_all(&self, documents: &[ContentDocument]) -> AuditReport {
        let start = std::time::Instant::now();
        let mut summary = AuditSummary {
            documents_scanned: documents.len(),
            ..AuditSummary::default()
        };
        let mut reports = Vec::new();

        for document in documents {
            let findings = self.audit(document);
            if findings.is_empty() {
                continue;
            }

            summary.documents_with_findings += 1;
            for finding in &findings {
                match finding.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                }
                *summary.by_category.entry(finding.category).or_insert(0) += 1;
            }
            reports.push(DocumentReport {
                file: document.file_name.clone(),
                findings,
            });
        }

        AuditReport {
            profile: self.context.profile,
            documents: reports,
            summary,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}
