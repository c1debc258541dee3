//! Content maintenance CLI
//!
//! # Usage
//!
//! ```bash
//! # Audit every article
//! content-maint audit
//!
//! # Append the configured FAQ blocks
//! content-maint --config content-maint.toml inject-faqs
//!
//! # Check the running site for broken links
//! content-maint links http://localhost:3000
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success, findings included
//! - 3: Invalid input or arguments
//! - 4: File or directory not found or inaccessible
//! - 5: Configuration error
//! - 10: Internal error

use clap::Parser;
use content_maint::{run_cli, MaintCli};

fn main() {
    let cli = MaintCli::parse();

    // Logs go to stderr so reports on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(cli.log_level().into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
