//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::codec::ParquetCodec;
use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::orchestrator::{BatchOrchestrator, RunSummary};
use crate::store::ObjectStoreBlobStore;
use std::sync::Arc;
use std::time::Instant;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.config()?;
        let store = ObjectStoreBlobStore::connect([
            config.in_bucket.as_str(),
            config.out_bucket.as_str(),
        ])?;
        let orchestrator =
            BatchOrchestrator::new(config, Arc::new(store), Arc::new(ParquetCodec::new()));

        let summary = match self.cli.command() {
            Commands::Run => self.execute(&orchestrator).await?,
            Commands::Plan => {
                let diff = orchestrator.plan().await?;
                RunSummary::from_plan(&orchestrator.config().kind, &diff)
            }
        };

        let report = serde_json::to_string_pretty(&summary)?;
        println!("{report}");
        Ok(())
    }

    async fn execute(&self, orchestrator: &BatchOrchestrator) -> Result<RunSummary> {
        let config = orchestrator.config();
        tracing::info!(
            kind = %config.kind,
            input = %format!("{}/{}", config.in_bucket, config.in_prefix),
            output = %format!("{}/{}", config.out_bucket, config.out_prefix),
            markers = %config.marker_prefix,
            max_workers = config.max_workers,
            "Splitter job invoked"
        );

        let start = Instant::now();
        let summary = orchestrator.run().await.inspect_err(|e| {
            tracing::error!(kind = %config.kind, error = %e, "Run aborted");
        })?;
        tracing::info!(
            "{} finished in {:.2} sec",
            config.kind,
            start.elapsed().as_secs_f64()
        );
        Ok(summary)
    }

    /// Build the run configuration from flags and environment
    pub fn config(&self) -> Result<SplitConfig> {
        let cli = &self.cli;
        let config = SplitConfig::new(
            required(cli.kind.as_deref(), "KIND")?,
            required(cli.in_bucket.as_deref(), "IN_BUCKET")?,
            required(cli.out_bucket.as_deref(), "OUT_BUCKET")?,
            required(cli.in_prefix.as_deref(), "IN_PREFIX")?,
            required(cli.out_prefix.as_deref(), "OUT_PREFIX")?,
            required(cli.marker_prefix.as_deref(), "MARKER_PREFIX")?,
        )
        .with_max_workers(cli.max_workers)
        .with_partition_column(&cli.partition_column);

        config.validate()?;
        Ok(config)
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::missing_field(field))
}
