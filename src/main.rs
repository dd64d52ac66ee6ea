//! Parquet splitter CLI
//!
//! Repartitions every outstanding date and exits non-zero on a fatal error.

use clap::Parser;
use parquet_splitter::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        tracing::error!(
            error = %e,
            schema_error = e.is_schema_error(),
            may_leave_orphans = e.may_leave_orphans(),
            "Splitter run failed"
        );
        if e.may_leave_orphans() {
            tracing::warn!("Partitions without a marker may remain; the next run rewrites them");
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
