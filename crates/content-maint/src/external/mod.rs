//! External tool runners
//!
//! The crawler and link checker are node tools launched through a runner
//! (`npx` by default). Their failures are reported back as outcomes with
//! guidance instead of errors: a broken site or a missing tool never fails
//! the maintenance run.

pub mod lighthouse;
pub mod links;

pub use lighthouse::{run_technical_audit, LighthouseScores, TechnicalAuditOutcome};
pub use links::{run_link_check, LinkCheckOutcome};

use std::process::{Command, ExitStatus, Output, Stdio};
use tracing::debug;

use crate::error::{ContentError, Result};

/// A tool invocation through the configured runner
#[derive(Debug, Clone)]
pub struct ToolCommand {
    runner: String,
    args: Vec<String>,
}

impl ToolCommand {
    pub fn new(runner: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            runner: runner.into(),
            args: vec![tool.into()],
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Shell-like rendering for logs and messages
    pub fn display(&self) -> String {
        format!("{} {}", self.runner, self.args.join(" "))
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.runner);
        command.args(&self.args);
        command
    }

    /// Run with output captured
    pub fn run_captured(&self) -> Result<Output> {
        debug!(command = %self.display(), "Running external tool");
        self.command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ContentError::ExternalTool(format!("{}: {}", self.display(), e)))
    }

    /// Run with the console inherited, streaming the tool's own output
    pub fn run_inherited(&self) -> Result<ExitStatus> {
        debug!(command = %self.display(), "Running external tool");
        self.command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ContentError::ExternalTool(format!("{}: {}", self.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let cmd = ToolCommand::new("npx", "blc").arg("http://localhost:3000").arg("-ro");
        assert_eq!(cmd.display(), "npx blc http://localhost:3000 -ro");
    }

    #[test]
    fn test_missing_runner_is_external_tool_error() {
        let cmd = ToolCommand::new("content-maint-no-such-runner", "blc");
        let err = cmd.run_captured().unwrap_err();
        assert!(matches!(err, ContentError::ExternalTool(_)));
    }
}
