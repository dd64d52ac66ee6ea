//! Batch orchestration module
//!
//! Drives every outstanding unit through load, partition, write and mark.
//!
//! # Overview
//!
//! The orchestrator module provides:
//! - `BatchOrchestrator` - sequential per-unit state machine over the store
//! - `RunSummary` - counts reported at the end of a run
//! - `LoadOutcome` / `UnitOutcome` - benign per-unit results
//!
//! Units run one at a time in ascending order. Concurrency exists only
//! inside a unit's partition writes. Any error returned from
//! [`BatchOrchestrator::run`] ends the run; later units are not attempted.

mod types;

pub use types::{LoadOutcome, RunSummary, UnitOutcome, UnitState};

use crate::codec::ColumnarCodec;
use crate::config::SplitConfig;
use crate::diff::KeySetDiff;
use crate::error::Result;
use crate::marker::MarkerRecorder;
use crate::partition::Partitioner;
use crate::store::BlobStore;
use crate::writer::ParallelWriter;
use std::sync::Arc;
use std::time::Instant;

/// Repartitions every outstanding unit and marks it done
pub struct BatchOrchestrator {
    config: Arc<SplitConfig>,
    store: Arc<dyn BlobStore>,
    codec: Arc<dyn ColumnarCodec>,
    partitioner: Partitioner,
    writer: ParallelWriter,
    recorder: MarkerRecorder,
}

impl BatchOrchestrator {
    /// Wire the components for one configuration
    pub fn new(
        config: SplitConfig,
        store: Arc<dyn BlobStore>,
        codec: Arc<dyn ColumnarCodec>,
    ) -> Self {
        let config = Arc::new(config);
        let partitioner = Partitioner::new(&config.partition_column);
        let writer =
            ParallelWriter::new(Arc::clone(&store), Arc::clone(&codec), Arc::clone(&config));
        let recorder = MarkerRecorder::new(Arc::clone(&store), Arc::clone(&config));
        Self {
            config,
            store,
            codec,
            partitioner,
            writer,
            recorder,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Get the marker recorder
    pub fn recorder(&self) -> &MarkerRecorder {
        &self.recorder
    }

    /// List inputs and markers and compute the outstanding units
    pub async fn plan(&self) -> Result<KeySetDiff> {
        let config = &self.config;

        let start = Instant::now();
        let input_keys = self.store.list(&config.in_bucket, &config.in_prefix).await?;
        tracing::info!(
            "[list] in_keys total={} objects, elapsed={:.2} sec",
            input_keys.len(),
            start.elapsed().as_secs_f64()
        );

        let start = Instant::now();
        let marker_keys = self
            .store
            .list(&config.out_bucket, &config.marker_prefix)
            .await?;
        tracing::info!(
            "[list] marker_keys total={} objects, elapsed={:.2} sec",
            marker_keys.len(),
            start.elapsed().as_secs_f64()
        );

        let diff = KeySetDiff::compute(&input_keys, &marker_keys);
        tracing::info!(
            "[{}] input={} output={} missing={}",
            config.kind,
            diff.input_units.len(),
            diff.done_units.len(),
            diff.outstanding.len()
        );
        Ok(diff)
    }

    /// Process every outstanding unit in ascending order
    pub async fn run(&self) -> Result<RunSummary> {
        self.config.validate()?;
        let diff = self.plan().await?;

        let mut summary = RunSummary::from_plan(&self.config.kind, &diff);

        for unit in &diff.outstanding {
            let outcome = self.process_unit(unit).await.inspect_err(|e| {
                tracing::error!(
                    unit = %unit,
                    state = %UnitState::Aborted,
                    error = %e,
                    "Unit aborted"
                );
            })?;
            summary.record(unit, &outcome);
        }

        tracing::info!(
            kind = %summary.kind,
            input_units = summary.input_units,
            done_units = summary.done_units,
            outstanding = summary.outstanding.len(),
            processed = summary.processed,
            "Run complete"
        );
        Ok(summary)
    }

    /// Drive one unit to a terminal state
    pub async fn process_unit(&self, unit: &str) -> Result<UnitOutcome> {
        let kind = &self.config.kind;
        let input_key = self.config.input_key(unit);
        let input_location = self.store.location(&self.config.in_bucket, &input_key);
        tracing::debug!(unit, state = %UnitState::Pending, "Processing unit");

        let batch = match self.load(unit).await? {
            LoadOutcome::Loaded(batch) => batch,
            LoadOutcome::Missing => {
                tracing::warn!("[{kind}] not found: {input_location}");
                return Ok(UnitOutcome::SkippedMissing);
            }
            LoadOutcome::Empty => {
                tracing::info!("[{kind}] empty: {input_key}");
                return Ok(UnitOutcome::SkippedEmpty);
            }
        };
        tracing::debug!(unit, rows = batch.num_rows(), state = %UnitState::Loaded);

        let partitions = self.partitioner.split(&batch, &input_location)?;
        let submitted = partitions.len();
        tracing::debug!(unit, partitions = submitted, state = %UnitState::Partitioned);

        let outputs = self.writer.write_all(unit, partitions).await?;
        tracing::info!(
            "[OK] {kind} {unit}: {submitted} {}s -> parallel PUT x{}",
            self.partitioner.key_column(),
            outputs.len()
        );
        tracing::debug!(unit, state = %UnitState::Written);

        let marker = self.recorder.record(unit, &input_location, outputs).await?;
        tracing::debug!(unit, state = %UnitState::Marked);
        Ok(UnitOutcome::Marked(marker))
    }

    /// Fetch and decode a unit's input
    ///
    /// Absence and emptiness are outcomes, not errors.
    pub async fn load(&self, unit: &str) -> Result<LoadOutcome> {
        let input_key = self.config.input_key(unit);
        let Some(bytes) = self.store.get(&self.config.in_bucket, &input_key).await? else {
            return Ok(LoadOutcome::Missing);
        };

        let codec = Arc::clone(&self.codec);
        let batch = tokio::task::spawn_blocking(move || codec.decode(bytes)).await??;

        if batch.num_rows() == 0 {
            Ok(LoadOutcome::Empty)
        } else {
            Ok(LoadOutcome::Loaded(batch))
        }
    }
}
