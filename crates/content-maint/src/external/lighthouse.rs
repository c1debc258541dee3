//! Technical audit through Lighthouse
//!
//! Runs the crawler headless against the site, then reads the category
//! scores out of the JSON report it leaves in the report directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use super::ToolCommand;
use crate::config::ExternalSettings;
use crate::error::{ContentError, Result};

/// Report file stem passed to `--output-path`
pub const REPORT_STEM: &str = "lighthouse-report";

const GUIDANCE: &str = "Check that the site is running at the given URL before starting the audit";

/// Category scores in percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LighthouseScores {
    pub performance: Option<f64>,
    pub accessibility: Option<f64>,
    pub best_practices: Option<f64>,
    pub seo: Option<f64>,
}

#[derive(Deserialize)]
struct RawReport {
    categories: RawCategories,
}

#[derive(Deserialize)]
struct RawCategories {
    performance: Option<RawCategory>,
    accessibility: Option<RawCategory>,
    #[serde(rename = "best-practices")]
    best_practices: Option<RawCategory>,
    seo: Option<RawCategory>,
}

#[derive(Deserialize)]
struct RawCategory {
    score: Option<f64>,
}

fn percent(category: Option<RawCategory>) -> Option<f64> {
    category.and_then(|c| c.score).map(|s| (s * 100.0).round())
}

/// Extract category scores from a Lighthouse JSON report
pub fn parse_report(json: &str) -> Result<LighthouseScores> {
    let report: RawReport = serde_json::from_str(json)?;
    let c = report.categories;
    Ok(LighthouseScores {
        performance: percent(c.performance),
        accessibility: percent(c.accessibility),
        best_practices: percent(c.best_practices),
        seo: percent(c.seo),
    })
}

/// How the technical audit ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TechnicalAuditOutcome {
    Completed {
        scores: LighthouseScores,
        html_report: PathBuf,
    },
    Failed {
        reason: String,
        guidance: String,
    },
}

fn failed(reason: impl Into<String>) -> TechnicalAuditOutcome {
    let reason = reason.into();
    warn!(reason = %reason, "Technical audit failed");
    TechnicalAuditOutcome::Failed {
        reason,
        guidance: GUIDANCE.to_string(),
    }
}

pub fn lighthouse_command(runner: &str, base_url: &str, report_dir: &Path) -> ToolCommand {
    ToolCommand::new(runner, "lighthouse")
        .arg(base_url)
        .arg("--quiet")
        .arg("--chrome-flags=--headless")
        .arg("--output")
        .arg("json")
        .arg("--output")
        .arg("html")
        .arg("--output-path")
        .arg(report_dir.join(REPORT_STEM).display().to_string())
}

/// Run Lighthouse against `base_url` and collect its scores.
///
/// Only a report directory that cannot be created is an error; tool
/// failures come back as [`TechnicalAuditOutcome::Failed`].
pub fn run_technical_audit(
    settings: &ExternalSettings,
    base_url: &str,
) -> Result<TechnicalAuditOutcome> {
    let report_dir = &settings.report_dir;
    std::fs::create_dir_all(report_dir).map_err(|e| ContentError::io_at(report_dir, e))?;

    let command = lighthouse_command(&settings.runner, base_url, report_dir);
    let output = match command.run_captured() {
        Ok(output) => output,
        Err(e) => return Ok(failed(e.to_string())),
    };
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Ok(failed(format!(
            "`{}` exited with {}: {}",
            command.display(),
            output.status,
            stderr.trim()
        )));
    }

    let json_path = report_dir.join(format!("{}.report.json", REPORT_STEM));
    let json = match std::fs::read_to_string(&json_path) {
        Ok(json) => json,
        Err(e) => return Ok(failed(format!("{}: {}", json_path.display(), e))),
    };

    match parse_report(&json) {
        Ok(scores) => Ok(TechnicalAuditOutcome::Completed {
            scores,
            html_report: report_dir.join(format!("{}.report.html", REPORT_STEM)),
        }),
        Err(e) => Ok(failed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_scores() {
        let json = r#"{
            "categories": {
                "performance": {"score": 0.91},
                "accessibility": {"score": 1},
                "best-practices": {"score": 0.78},
                "seo": {"score": null}
            }
        }"#;
        let scores = parse_report(json).unwrap();
        assert_eq!(scores.performance, Some(91.0));
        assert_eq!(scores.accessibility, Some(100.0));
        assert_eq!(scores.best_practices, Some(78.0));
        assert_eq!(scores.seo, None);
    }

    #[test]
    fn test_parse_report_rejects_garbage() {
        assert!(parse_report("not json").is_err());
    }

    #[test]
    fn test_command_line() {
        let cmd = lighthouse_command("npx", "http://localhost:3000", Path::new("reports"));
        assert_eq!(
            cmd.display(),
            "npx lighthouse http://localhost:3000 --quiet --chrome-flags=--headless \
             --output json --output html --output-path reports/lighthouse-report"
        );
    }

    #[test]
    fn test_missing_runner_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ExternalSettings {
            runner: "content-maint-no-such-runner".to_string(),
            base_url: "http://localhost:3000".to_string(),
            report_dir: dir.path().join("reports"),
        };
        let outcome = run_technical_audit(&settings, &settings.base_url).unwrap();
        assert!(matches!(outcome, TechnicalAuditOutcome::Failed { .. }));
        assert!(settings.report_dir.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_report_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ExternalSettings {
            runner: "true".to_string(),
            base_url: "http://localhost:3000".to_string(),
            report_dir: dir.path().to_path_buf(),
        };
        let outcome = run_technical_audit(&settings, &settings.base_url).unwrap();
        match outcome {
            TechnicalAuditOutcome::Failed { reason, .. } => {
                assert!(reason.contains("lighthouse-report.report.json"))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
