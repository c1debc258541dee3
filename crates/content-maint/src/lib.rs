//! Content Maintenance
//!
//! Audit and bulk-maintenance tooling for a directory of MDX review
//! articles with YAML front matter.
//!
//! ## Features
//!
//! - **Audit**: rule-based SEO, accessibility and answer-engine checks with
//!   per-document findings and a run summary
//! - **Transforms**: FAQ injection, title rewrites, publish date
//!   normalization and cover image updates, each idempotent and confined to
//!   one field or one guarded insertion point
//! - **Keyword gaps**: high-volume, reachable keywords from a cluster CSV
//!   that no article covers yet
//! - **External checks**: Lighthouse scores and broken-link crawling of the
//!   running site
//! - **CLI**: table, JSON and YAML output with stable exit codes
//!
//! ## Architecture
//!
//! 1. **Document** (`document/`): front matter split, parse and serialize,
//!    plus directory loading.
//! 2. **Audit** (`audit/`): the `Rule` trait, the built-in rules and the
//!    engine that aggregates their findings.
//! 3. **Transform** (`transform/`): the text rewrites and their per-file
//!    outcome reports.
//! 4. **External** (`external/`): subprocess runners for node tools.
//! 5. **Keywords** (`keywords`): CSV export parsing and gap filtering.
//! 6. **Config** (`config`): mapping tables and thresholds.
//! 7. **CLI** (`cli/`): command tree, rendering and exit codes.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Audit the articles with the stricter profile
//! content-maint --config content-maint.toml audit --profile advanced
//!
//! # Bring future publish dates back into range, reproducibly
//! content-maint fix-dates --seed 42 --format json
//!
//! # Lighthouse scores for a local build
//! content-maint technical http://localhost:3000
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use content_maint::{load_documents, AuditEngine, AuditProfile, MaintenanceConfig};
//!
//! let config = MaintenanceConfig::default();
//! let documents = load_documents(&config.content_dir, &config.extensions).unwrap();
//! let report = AuditEngine::new(&config, AuditProfile::Advanced).audit_all(&documents);
//! println!("{} error(s)", report.summary.errors);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod external;
pub mod keywords;
pub mod transform;

pub use audit::{AuditEngine, AuditFinding, AuditProfile, AuditReport, Rule, RuleContext, Severity};
pub use cli::{ExitCode, MaintCli, MaintCommands, OutputFormat};
pub use config::MaintenanceConfig;
pub use document::{load_documents, ContentDocument, Metadata};
pub use error::{ContentError, Result};
pub use keywords::{KeywordOpportunity, KeywordReport};
pub use transform::{Outcome, TransformReport};

/// Run the CLI application
///
/// This is the main entry point for the CLI binary.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use content_maint::{run_cli, MaintCli};
///
/// fn main() {
///     let cli = MaintCli::parse();
///     let exit_code = run_cli(cli);
///     std::process::exit(exit_code.into());
/// }
/// ```
pub fn run_cli(cli: MaintCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
