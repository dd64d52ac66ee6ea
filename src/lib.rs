//! # Parquet Splitter
//!
//! Idempotent repartitioning of dated Parquet snapshots in object storage.
//!
//! For every date whose input exists but whose completion marker does not,
//! the splitter loads the snapshot, splits its rows by a key column, writes
//! one object per key value, and finally writes a marker so the date is
//! never processed again.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use parquet_splitter::{BatchOrchestrator, ObjectStoreBlobStore, ParquetCodec, SplitConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> parquet_splitter::Result<()> {
//!     let config = SplitConfig::new("pos", "raw-bucket", "lake-bucket", "daily", "by_item", "markers");
//!     let store = ObjectStoreBlobStore::connect(["raw-bucket", "lake-bucket"])?;
//!
//!     let orchestrator =
//!         BatchOrchestrator::new(config, Arc::new(store), Arc::new(ParquetCodec::new()));
//!     let summary = orchestrator.run().await?;
//!     println!("processed {} dates", summary.processed);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      BatchOrchestrator                       │
//! │   plan() → outstanding dates      run() → RunSummary         │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬───────────┬──────┴──────┬─────────────┬─────────┐
//! │   Diff    │ Partition │   Writer    │   Marker    │  Codec  │
//! ├───────────┼───────────┼─────────────┼─────────────┼─────────┤
//! │ listings  │ group by  │ JoinSet +   │ JSON record │ Parquet │
//! │ → units   │ key column│ semaphore   │ after writes│ ↔ Arrow │
//! └───────────┴───────────┴─────────────┴─────────────┴─────────┘
//!                                │
//!                  BlobStore (S3, R2, GCS, Azure, local, memory)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Run configuration and key conventions
pub mod config;

/// Object store capability
pub mod store;

/// Columnar encode/decode
pub mod codec;

/// Outstanding-work computation
pub mod diff;

/// Group-by-key splitting
pub mod partition;

/// Bounded-concurrency partition writes
pub mod writer;

/// Completion markers
pub mod marker;

/// Per-unit state machine and run loop
pub mod orchestrator;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use codec::{ColumnarCodec, ParquetCodec};
pub use config::SplitConfig;
pub use diff::KeySetDiff;
pub use error::{Error, Result};
pub use marker::{CompletionMarker, MarkerRecorder};
pub use orchestrator::{BatchOrchestrator, RunSummary, UnitOutcome};
pub use partition::{Partition, Partitioner};
pub use store::{BlobStore, ObjectStoreBlobStore};
pub use writer::ParallelWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
