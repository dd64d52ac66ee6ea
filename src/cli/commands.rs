//! CLI commands and argument parsing
//!
//! Every option can come from an upper-case flag (`--IN_BUCKET`), its
//! lower-case alias (`--in-bucket`) or the environment variable of the same
//! name. Flags win over the environment.

use crate::config::{DEFAULT_MAX_WORKERS, DEFAULT_PARTITION_COLUMN};
use clap::{Parser, Subcommand};

/// Repartition dated Parquet snapshots by key, once per date
#[derive(Parser, Debug)]
#[command(name = "parquet-splitter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Label stamped into markers and logs
    #[arg(long = "KIND", env = "KIND", alias = "kind", global = true)]
    pub kind: Option<String>,

    /// Input bucket (name or s3://, gs://, az://, file://, memory:// URL)
    #[arg(long = "IN_BUCKET", env = "IN_BUCKET", alias = "in-bucket", global = true)]
    pub in_bucket: Option<String>,

    /// Output bucket for partitions and markers
    #[arg(long = "OUT_BUCKET", env = "OUT_BUCKET", alias = "out-bucket", global = true)]
    pub out_bucket: Option<String>,

    /// Key prefix of input snapshots
    #[arg(long = "IN_PREFIX", env = "IN_PREFIX", alias = "in-prefix", global = true)]
    pub in_prefix: Option<String>,

    /// Key prefix of output partitions
    #[arg(long = "OUT_PREFIX", env = "OUT_PREFIX", alias = "out-prefix", global = true)]
    pub out_prefix: Option<String>,

    /// Key prefix of completion markers
    #[arg(
        long = "MARKER_PREFIX",
        env = "MARKER_PREFIX",
        alias = "marker-prefix",
        global = true
    )]
    pub marker_prefix: Option<String>,

    /// Concurrent partition writes per date (24-48 works well against S3)
    #[arg(
        long = "MAX_WORKERS",
        env = "MAX_WORKERS",
        alias = "max-workers",
        global = true,
        default_value_t = DEFAULT_MAX_WORKERS
    )]
    pub max_workers: usize,

    /// Column the rows are split by
    #[arg(
        long = "PARTITION_COLUMN",
        env = "PARTITION_COLUMN",
        alias = "partition-column",
        global = true,
        default_value = DEFAULT_PARTITION_COLUMN
    )]
    pub partition_column: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Repartition every outstanding date and mark it done
    Run,

    /// Show which dates are outstanding without writing anything
    Plan,
}

impl Cli {
    /// The command to execute, `run` when none was given
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }
}
