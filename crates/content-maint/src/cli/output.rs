//! Output formatting for the content maintenance CLI
//!
//! Reports render as JSON, YAML or a human-readable table with
//! severity-based coloring. Everything goes to stdout; logs stay on stderr.

use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::io::{self, Write};

use crate::audit::{AuditFinding, AuditReport, Severity};
use crate::error::{ContentError, Result};
use crate::external::{LinkCheckOutcome, TechnicalAuditOutcome};
use crate::keywords::KeywordReport;
use crate::transform::{Outcome, TransformReport};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

const OUTCOME_ORDER: [Outcome; 5] = [
    Outcome::Updated,
    Outcome::AlreadyApplied,
    Outcome::Unchanged,
    Outcome::NotFound,
    Outcome::Skipped,
];

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ContentError::SerializationError(e.to_string()))?;
    writeln!(out, "{}", json).ok();
    Ok(())
}

fn write_yaml<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(value)
        .map_err(|e| ContentError::SerializationError(e.to_string()))?;
    write!(out, "{}", yaml).ok();
    Ok(())
}

fn severity_icon(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "x".red(),
        Severity::Warning => "!".yellow(),
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "ERROR".red().bold(),
        Severity::Warning => "WARNING".yellow().bold(),
    }
}

fn outcome_icon(outcome: Outcome) -> ColoredString {
    match outcome {
        Outcome::Updated => "+".green(),
        Outcome::AlreadyApplied | Outcome::Unchanged => "=".dimmed(),
        Outcome::NotFound => "?".yellow(),
        Outcome::Skipped => "-".yellow(),
    }
}

/// Render an audit report to stdout
pub fn render_audit(report: &AuditReport, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout();
    write_audit(&mut stdout, report, format)?;
    stdout.flush().ok();
    Ok(())
}

pub fn write_audit(out: &mut dyn Write, report: &AuditReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Yaml => write_yaml(out, report),
        OutputFormat::Table => {
            write_audit_table(out, report);
            Ok(())
        }
    }
}

fn write_audit_table(out: &mut dyn Write, report: &AuditReport) {
    let summary = &report.summary;

    writeln!(out).ok();
    writeln!(
        out,
        "{}",
        format!("Content Audit ({})", report.profile).cyan().bold()
    )
    .ok();
    writeln!(out, "{}", "=".repeat(60)).ok();
    writeln!(out).ok();

    if report.is_clean() {
        writeln!(
            out,
            "{} No issues found in {} document(s)",
            "+".green(),
            summary.documents_scanned
        )
        .ok();
    } else {
        writeln!(
            out,
            "{} {} error(s) and {} warning(s) in {} of {} document(s)",
            if summary.errors > 0 { "x".red() } else { "!".yellow() },
            summary.errors,
            summary.warnings,
            summary.documents_with_findings,
            summary.documents_scanned
        )
        .ok();
    }

    for document in &report.documents {
        writeln!(out).ok();
        writeln!(out, "{}", document.file.bold()).ok();
        for finding in &document.findings {
            write_finding(out, finding);
        }
    }

    if !summary.by_category.is_empty() {
        writeln!(out).ok();
        writeln!(out, "{}", "-".repeat(60)).ok();
        writeln!(out, "{}", "Statistics:".cyan().bold()).ok();
        if summary.errors > 0 {
            writeln!(out, "  {} Errors:   {}", "x".red(), summary.errors.to_string().red()).ok();
        }
        if summary.warnings > 0 {
            writeln!(
                out,
                "  {} Warnings: {}",
                "!".yellow(),
                summary.warnings.to_string().yellow()
            )
            .ok();
        }
        for (category, count) in &summary.by_category {
            writeln!(out, "    {:<18} {}", category.to_string(), count).ok();
        }
    }

    writeln!(out).ok();
    writeln!(out, "Completed in {} ms", report.duration_ms.to_string().dimmed()).ok();
}

fn write_finding(out: &mut dyn Write, finding: &AuditFinding) {
    writeln!(
        out,
        "  {} [{}] {} {}",
        severity_icon(finding.severity),
        finding.rule_id.dimmed(),
        severity_label(finding.severity),
        finding.message
    )
    .ok();
    if let Some(suggestion) = &finding.suggestion {
        writeln!(out, "    {} {}", "Fix:".dimmed(), suggestion.green()).ok();
    }
}

/// Render a transform report to stdout
pub fn render_transform(report: &TransformReport, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout();
    write_transform(&mut stdout, report, format)?;
    stdout.flush().ok();
    Ok(())
}

pub fn write_transform(
    out: &mut dyn Write,
    report: &TransformReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Yaml => write_yaml(out, report),
        OutputFormat::Table => {
            write_transform_table(out, report);
            Ok(())
        }
    }
}

fn write_transform_table(out: &mut dyn Write, report: &TransformReport) {
    writeln!(out).ok();
    writeln!(out, "{}", report.transform.cyan().bold()).ok();
    writeln!(out, "{}", "=".repeat(60)).ok();

    if report.files.is_empty() {
        writeln!(out, "Nothing to do").ok();
        return;
    }

    for file in &report.files {
        writeln!(
            out,
            "{} {:<40} {:<16} {}",
            outcome_icon(file.outcome),
            file.file,
            file.outcome.to_string(),
            file.detail.dimmed()
        )
        .ok();
    }

    let counts: Vec<String> = OUTCOME_ORDER
        .iter()
        .map(|o| (o, report.count(*o)))
        .filter(|(_, n)| *n > 0)
        .map(|(o, n)| format!("{} {}", n, o))
        .collect();
    writeln!(out, "{}", "-".repeat(60)).ok();
    writeln!(out, "{} {}", "Summary:".cyan().bold(), counts.join(", ")).ok();
}

/// Render a keyword gap report to stdout
pub fn render_keywords(report: &KeywordReport, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout();
    write_keywords(&mut stdout, report, format)?;
    stdout.flush().ok();
    Ok(())
}

pub fn write_keywords(out: &mut dyn Write, report: &KeywordReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Yaml => write_yaml(out, report),
        OutputFormat::Table => {
            writeln!(out).ok();
            writeln!(out, "{}", "Keyword Opportunities".cyan().bold()).ok();
            writeln!(out, "{}", "=".repeat(60)).ok();
            writeln!(
                out,
                "Found {} potential keywords. Showing top {}",
                report.total,
                report.opportunities.len()
            )
            .ok();
            if report.opportunities.is_empty() {
                return Ok(());
            }

            writeln!(out).ok();
            writeln!(out, "{:<40} {:>8} {:>4}  {}", "Keyword", "Volume", "KD", "Intent").ok();
            writeln!(out, "{}", "-".repeat(60)).ok();
            for o in &report.opportunities {
                writeln!(
                    out,
                    "{:<40} {:>8} {:>4}  {}",
                    o.keyword,
                    o.volume,
                    o.difficulty,
                    o.intent.dimmed()
                )
                .ok();
            }
            Ok(())
        }
    }
}

fn score_cell(score: Option<f64>) -> ColoredString {
    match score {
        Some(s) if s >= 90.0 => format!("{:.0}", s).green(),
        Some(s) if s >= 50.0 => format!("{:.0}", s).yellow(),
        Some(s) => format!("{:.0}", s).red(),
        None => "n/a".dimmed(),
    }
}

/// Print the outcome of a technical audit
pub fn render_technical(outcome: &TechnicalAuditOutcome, base_url: &str) {
    let mut stdout = io::stdout();
    write_technical(&mut stdout, outcome, base_url);
    stdout.flush().ok();
}

pub fn write_technical(out: &mut dyn Write, outcome: &TechnicalAuditOutcome, base_url: &str) {
    writeln!(out).ok();
    writeln!(out, "{} {}", "Technical Audit".cyan().bold(), base_url.dimmed()).ok();
    writeln!(out, "{}", "=".repeat(60)).ok();

    match outcome {
        TechnicalAuditOutcome::Completed {
            scores,
            html_report,
        } => {
            writeln!(out, "  Performance:    {}", score_cell(scores.performance)).ok();
            writeln!(out, "  Accessibility:  {}", score_cell(scores.accessibility)).ok();
            writeln!(out, "  Best Practices: {}", score_cell(scores.best_practices)).ok();
            writeln!(out, "  SEO:            {}", score_cell(scores.seo)).ok();
            writeln!(out).ok();
            writeln!(
                out,
                "Full report: {}",
                html_report.display().to_string().blue().underline()
            )
            .ok();
        }
        TechnicalAuditOutcome::Failed { reason, guidance } => {
            writeln!(out, "{} {}", "x".red(), reason).ok();
            writeln!(out, "  {} {}", "Hint:".dimmed(), guidance.yellow()).ok();
        }
    }
}

/// Print the outcome of a link check
pub fn render_link_check(outcome: &LinkCheckOutcome, base_url: &str) {
    let mut stdout = io::stdout();
    write_link_check(&mut stdout, outcome, base_url);
    stdout.flush().ok();
}

pub fn write_link_check(out: &mut dyn Write, outcome: &LinkCheckOutcome, base_url: &str) {
    writeln!(out).ok();
    match outcome {
        LinkCheckOutcome::Clean => {
            writeln!(out, "{} No broken links found on {}", "+".green(), base_url).ok();
        }
        LinkCheckOutcome::IssuesReported { exit_code } => {
            let code = exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string());
            writeln!(
                out,
                "{} Link checker reported problems on {} (exit {}), see its output above",
                "!".yellow(),
                base_url,
                code
            )
            .ok();
        }
        LinkCheckOutcome::Failed { reason, guidance } => {
            writeln!(out, "{} {}", "x".red(), reason).ok();
            writeln!(out, "  {} {}", "Hint:".dimmed(), guidance.yellow()).ok();
        }
    }
}
