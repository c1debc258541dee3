//! CLI command definitions for content maintenance
//!
//! Provides Clap-based command definitions for auditing the article
//! collection, applying the maintenance transforms and launching the
//! external site checks.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::output::{self, OutputFormat};
use super::ExitCode;
use crate::audit::{AuditEngine, AuditProfile};
use crate::config::MaintenanceConfig;
use crate::document::load_documents;
use crate::error::{ContentError, Result};
use crate::external::{run_link_check, run_technical_audit};
use crate::keywords::analyze_keywords;
use crate::transform::{inject_faqs, normalize_dates, rewrite_cover_images, rewrite_titles};

/// Content maintenance CLI
///
/// Audit review articles for SEO and accessibility issues and apply the
/// bulk fixes configured for the site.
#[derive(Parser, Debug)]
#[command(name = "content-maint")]
#[command(about = "Audit and maintain the site's review articles", long_about = None)]
#[command(version)]
pub struct MaintCli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, env = "CONTENT_MAINT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the articles, overrides the configuration
    #[arg(long, env = "CONTENT_MAINT_DIR", global = true)]
    pub content_dir: Option<PathBuf>,

    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: MaintCommands,
}

impl MaintCli {
    /// Log level selected by `-q` and `-v`
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Available maintenance commands
#[derive(Subcommand, Debug)]
pub enum MaintCommands {
    /// Audit every article and report findings
    ///
    /// Findings never fail the run; the command exits 0 once the report
    /// is printed.
    Audit {
        /// Rule set to run
        #[arg(long, value_enum, default_value = "standard")]
        profile: AuditProfile,

        /// Output format for the report
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Append the configured FAQ blocks to their articles
    InjectFaqs {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Replace article titles from the configured table
    FixTitles {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Move future publish dates back into the allowed window
    FixDates {
        /// Seed for the date draw, for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Point cover images at the URLs mapped to each article id
    UpdateImages {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Run a Lighthouse audit against the running site
    Technical {
        /// Site address, defaults to the configured base URL
        base_url: Option<String>,
    },

    /// Check the running site for broken links
    Links {
        /// Site address, defaults to the configured base URL
        base_url: Option<String>,
    },

    /// List high-volume keywords no article covers yet
    Keywords {
        /// Keyword cluster export (CSV with a header row)
        csv: PathBuf,

        /// How many opportunities to show, overrides the configuration
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Load the configuration and apply command-line overrides.
///
/// Unreadable or malformed configuration surfaces as a configuration
/// error so it maps to its own exit code.
pub fn load_config(path: Option<&Path>, content_dir: Option<PathBuf>) -> Result<MaintenanceConfig> {
    let mut config = MaintenanceConfig::load(path).map_err(|e| match e {
        ContentError::ParseError(msg) | ContentError::FileError(msg) => {
            ContentError::ConfigError(msg)
        }
        other => other,
    })?;

    if let Some(dir) = content_dir {
        // the flag wins over every directory in the file
        config = config.with_content_dir(dir);
        config.dates.content_dir = None;
    }

    debug!(content_dir = %config.content_dir.display(), "Configuration loaded");
    Ok(config)
}

/// Execute the audit command
pub fn execute_audit(
    config: &MaintenanceConfig,
    profile: AuditProfile,
    format: OutputFormat,
) -> Result<ExitCode> {
    let documents = load_documents(&config.content_dir, &config.extensions)?;
    info!(documents = documents.len(), profile = %profile, "Auditing content");

    let engine = AuditEngine::new(config, profile);
    let report = engine.audit_all(&documents);
    output::render_audit(&report, format)?;

    Ok(ExitCode::Success)
}

/// Execute the inject-faqs command
pub fn execute_inject_faqs(config: &MaintenanceConfig, format: OutputFormat) -> Result<ExitCode> {
    let report = inject_faqs(&config.content_dir, &config.faq)?;
    output::render_transform(&report, format)?;
    Ok(ExitCode::Success)
}

/// Execute the fix-titles command
pub fn execute_fix_titles(config: &MaintenanceConfig, format: OutputFormat) -> Result<ExitCode> {
    let report = rewrite_titles(&config.content_dir, &config.titles, &config.fields.title)?;
    output::render_transform(&report, format)?;
    Ok(ExitCode::Success)
}

/// Execute the fix-dates command
pub fn execute_fix_dates(
    config: &MaintenanceConfig,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report = normalize_dates(
        config.dates_dir(),
        &config.extensions,
        &config.fields.date,
        &config.dates,
        &mut rng,
    )?;
    output::render_transform(&report, format)?;
    Ok(ExitCode::Success)
}

/// Execute the update-images command
pub fn execute_update_images(config: &MaintenanceConfig, format: OutputFormat) -> Result<ExitCode> {
    let report = rewrite_cover_images(
        &config.content_dir,
        &config.extensions,
        &config.fields,
        &config.images,
    )?;
    output::render_transform(&report, format)?;
    Ok(ExitCode::Success)
}

/// Execute the technical command
pub fn execute_technical(config: &MaintenanceConfig, base_url: Option<String>) -> Result<ExitCode> {
    let base_url = base_url.unwrap_or_else(|| config.external.base_url.clone());
    info!(url = %base_url, "Starting technical audit");

    let outcome = run_technical_audit(&config.external, &base_url)?;
    output::render_technical(&outcome, &base_url);
    Ok(ExitCode::Success)
}

/// Execute the links command
pub fn execute_links(config: &MaintenanceConfig, base_url: Option<String>) -> Result<ExitCode> {
    let base_url = base_url.unwrap_or_else(|| config.external.base_url.clone());
    info!(url = %base_url, "Starting link check");

    let outcome = run_link_check(&config.external.runner, &base_url);
    output::render_link_check(&outcome, &base_url);
    Ok(ExitCode::Success)
}

/// Execute the keywords command
pub fn execute_keywords(
    config: &MaintenanceConfig,
    csv: &Path,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let mut settings = config.keywords.clone();
    if let Some(limit) = limit {
        if limit == 0 {
            return Err(ContentError::InvalidInput("--limit must be at least 1".to_string()));
        }
        settings.limit = limit;
    }
    info!(csv = %csv.display(), "Analyzing keyword export");

    let report = analyze_keywords(csv, &config.content_dir, &config.extensions, &settings)?;
    output::render_keywords(&report, format)?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_audit_defaults() {
        let cli = MaintCli::try_parse_from(["content-maint", "audit"]).unwrap();
        match cli.command {
            MaintCommands::Audit { profile, format } => {
                assert_eq!(profile, AuditProfile::Standard);
                assert_eq!(format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = MaintCli::try_parse_from([
            "content-maint",
            "fix-dates",
            "--seed",
            "9",
            "--content-dir",
            "site/reviews",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.content_dir, Some(PathBuf::from("site/reviews")));
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
        assert!(matches!(cli.command, MaintCommands::FixDates { seed: Some(9), .. }));
    }

    #[test]
    fn test_parse_keywords() {
        let cli = MaintCli::try_parse_from(["content-maint", "keywords", "clusters.csv", "--limit", "20"])
            .unwrap();
        match cli.command {
            MaintCommands::Keywords { csv, limit, format } => {
                assert_eq!(csv, PathBuf::from("clusters.csv"));
                assert_eq!(limit, Some(20));
                assert_eq!(format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_keywords_zero_limit_is_invalid() {
        let config = MaintenanceConfig::default();
        let err = execute_keywords(&config, Path::new("clusters.csv"), Some(0), OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(err, ContentError::InvalidInput(_)));
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let cli = MaintCli::try_parse_from(["content-maint", "-q", "-v", "links"]).unwrap();
        assert_eq!(cli.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_unknown_profile_rejected() {
        assert!(MaintCli::try_parse_from(["content-maint", "audit", "--profile", "deep"]).is_err());
    }

    #[test]
    fn test_content_dir_override_clears_dates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maint.toml");
        std::fs::write(&path, "[dates]\ncontent_dir = \"elsewhere\"\n").unwrap();

        let config = load_config(Some(&path), Some(PathBuf::from("override"))).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("override"));
        assert_eq!(config.dates_dir(), Path::new("override"));
    }

    #[test]
    fn test_bad_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maint.toml");
        std::fs::write(&path, "extensions = [").unwrap();
        let err = load_config(Some(&path), None).unwrap_err();
        assert!(matches!(err, ContentError::ConfigError(_)));

        let missing = load_config(Some(&dir.path().join("absent.toml")), None).unwrap_err();
        assert!(matches!(missing, ContentError::ConfigError(_)));
    }
}
