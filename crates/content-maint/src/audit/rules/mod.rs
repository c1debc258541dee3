//! Rule framework for document audits
//!
//! This module provides the core abstractions for defining and executing
//! audit rules against parsed documents.

pub mod content;
pub mod images;
pub mod metadata;
pub mod product;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::ContentDocument;

/// Categories of audit rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Front matter presence and length checks
    Metadata,
    /// Body depth and structure
    Content,
    /// Image alt text
    Accessibility,
    /// FAQ coverage for answer engines and voice search
    AnswerEngine,
    /// Product fields backing rich results
    StructuredData,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Metadata => write!(f, "metadata"),
            RuleCategory::Content => write!(f, "content"),
            RuleCategory::Accessibility => write!(f, "accessibility"),
            RuleCategory::AnswerEngine => write!(f, "answer_engine"),
            RuleCategory::StructuredData => write!(f, "structured_data"),
        }
    }
}

/// Severity level for audit findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Should be addressed but the page still works
    Warning,
    /// Must be fixed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Which set of rules an audit runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditProfile {
    /// Metadata, content, image and FAQ checks
    #[default]
    Standard,
    /// Standard checks plus structured product data, with a stricter depth threshold
    Advanced,
    /// Image alt text only
    Images,
}

impl AuditProfile {
    /// Minimum body length before a page counts as thin
    pub fn min_body_chars(&self) -> usize {
        match self {
            AuditProfile::Standard | AuditProfile::Images => 1500,
            AuditProfile::Advanced => 2000,
        }
    }
}

impl fmt::Display for AuditProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditProfile::Standard => write!(f, "standard"),
            AuditProfile::Advanced => write!(f, "advanced"),
            AuditProfile::Images => write!(f, "images"),
        }
    }
}

/// A single issue found in one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFinding {
    /// Rule that produced the finding
    pub rule_id: String,
    pub category: RuleCategory,
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Source document file name
    pub file: String,
    /// Metadata key involved, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Suggested fix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl AuditFinding {
    pub fn new(
        rule_id: impl Into<String>,
        category: RuleCategory,
        severity: Severity,
        message: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            category,
            severity,
            message: message.into(),
            file: file.into(),
            field: None,
            suggestion: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} in '{}': {}",
            self.severity, self.rule_id, self.file, self.message
        )
    }
}

/// Context provided to rules during evaluation
#[derive(Debug, Clone)]
pub struct RuleContext {
    pub profile: AuditProfile,
    /// Resolved thin-content threshold
    pub min_body_chars: usize,
}

impl RuleContext {
    pub fn new(profile: AuditProfile) -> Self {
        Self {
            profile,
            min_body_chars: profile.min_body_chars(),
        }
    }

    pub fn with_min_body_chars(mut self, min: usize) -> Self {
        self.min_body_chars = min;
        self
    }
}

/// Trait for implementing audit rules
///
/// Rules are stateless and deterministic: the same document always yields
/// the same findings, and no rule depends on another.
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &str;

    /// Description of what this rule checks
    fn description(&self) -> &str;

    fn category(&self) -> RuleCategory;

    /// Check if this rule runs under the given context
    fn is_applicable(&self, context: &RuleContext) -> bool {
        context.profile != AuditProfile::Images
    }

    /// Evaluate the rule against one document
    fn evaluate(&self, document: &ContentDocument, context: &RuleContext) -> Vec<AuditFinding>;
}

/// A boxed rule for dynamic dispatch
pub type BoxedRule = Box<dyn Rule>;

/// Character count as a reader sees it
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
