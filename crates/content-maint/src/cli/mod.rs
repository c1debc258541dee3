//! CLI module for content maintenance
//!
//! Wires the command tree to the audit engine, the transforms, the keyword
//! analysis and the external tool runners, and maps failures to process exit codes.

pub mod commands;
pub mod output;

pub use commands::{MaintCli, MaintCommands};
pub use output::OutputFormat;

use crate::error::{ContentError, Result};

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command ran to completion, findings included
    Success = 0,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File or directory not found or inaccessible
    FileError = 4,
    /// Configuration could not be loaded or is invalid
    ConfigError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Exit code for a failed run
    pub fn from_error(err: &ContentError) -> Self {
        match err {
            ContentError::DirectoryNotFound(_) | ContentError::FileError(_) => ExitCode::FileError,
            ContentError::ConfigError(_) => ExitCode::ConfigError,
            ContentError::InvalidInput(_) | ContentError::ParseError(_) => ExitCode::InvalidInput,
            ContentError::SerializationError(_)
            | ContentError::ExternalTool(_)
            | ContentError::InternalError(_) => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: MaintCli) -> Result<ExitCode> {
    let config = commands::load_config(cli.config.as_deref(), cli.content_dir)?;

    match cli.command {
        MaintCommands::Audit { profile, format } => {
            commands::execute_audit(&config, profile, format)
        }
        MaintCommands::InjectFaqs { format } => commands::execute_inject_faqs(&config, format),
        MaintCommands::FixTitles { format } => commands::execute_fix_titles(&config, format),
        MaintCommands::FixDates { seed, format } => {
            commands::execute_fix_dates(&config, seed, format)
        }
        MaintCommands::UpdateImages { format } => {
            commands::execute_update_images(&config, format)
        }
        MaintCommands::Technical { base_url } => commands::execute_technical(&config, base_url),
        MaintCommands::Links { base_url } => commands::execute_links(&config, base_url),
        MaintCommands::Keywords { csv, limit, format } => {
            commands::execute_keywords(&config, &csv, limit, format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_conversion() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::InvalidInput), 3);
        assert_eq!(i32::from(ExitCode::FileError), 4);
        assert_eq!(i32::from(ExitCode::ConfigError), 5);
        assert_eq!(i32::from(ExitCode::InternalError), 10);
    }

    #[test]
    fn test_exit_code_from_error() {
        assert_eq!(
            ExitCode::from_error(&ContentError::DirectoryNotFound("x".into())),
            ExitCode::FileError
        );
        assert_eq!(
            ExitCode::from_error(&ContentError::config_error("x")),
            ExitCode::ConfigError
        );
        assert_eq!(
            ExitCode::from_error(&ContentError::parse_error("x")),
            ExitCode::InvalidInput
        );
        assert_eq!(
            ExitCode::from_error(&ContentError::InternalError("x".into())),
            ExitCode::InternalError
        );
    }
}
