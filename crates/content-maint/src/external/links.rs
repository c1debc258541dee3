//! Broken link check
//!
//! Streams `blc` output straight to the console. The checker exits non-zero
//! whenever it finds broken links, so that status is informational.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ToolCommand;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkCheckOutcome {
    /// Checker finished without complaints
    Clean,
    /// Checker finished and reported problems (see its output)
    IssuesReported { exit_code: Option<i32> },
    /// Checker could not be started
    Failed { reason: String, guidance: String },
}

pub fn link_check_command(runner: &str, base_url: &str) -> ToolCommand {
    ToolCommand::new(runner, "blc").arg(base_url).arg("-ro")
}

/// Recursively check links of the site at `base_url`
pub fn run_link_check(runner: &str, base_url: &str) -> LinkCheckOutcome {
    let command = link_check_command(runner, base_url);
    match command.run_inherited() {
        Ok(status) if status.success() => LinkCheckOutcome::Clean,
        Ok(status) => LinkCheckOutcome::IssuesReported {
            exit_code: status.code(),
        },
        Err(e) => {
            warn!(error = %e, "Link checker could not be started");
            LinkCheckOutcome::Failed {
                reason: e.to_string(),
                guidance: "Install broken-link-checker (npm i -g broken-link-checker) or check the runner".to_string(),
            }
        }
    }
}
