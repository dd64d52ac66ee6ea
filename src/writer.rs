//! Bounded-concurrency partition writer
//!
//! One task per partition is spawned into a `JoinSet`; a semaphore caps how
//! many of them encode and upload at once. A failure does not cancel the
//! siblings: every submitted write runs to completion, then the first
//! failure observed is returned. Objects written by the siblings stay in the
//! store without a marker.

use crate::codec::ColumnarCodec;
use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::partition::Partition;
use crate::store::{BlobStore, PARQUET_CONTENT_TYPE};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Writes all partitions of a unit to the output bucket
#[derive(Clone)]
pub struct ParallelWriter {
    store: Arc<dyn BlobStore>,
    codec: Arc<dyn ColumnarCodec>,
    config: Arc<SplitConfig>,
}

impl ParallelWriter {
    /// Create a writer for the configured output bucket and prefix
    pub fn new(
        store: Arc<dyn BlobStore>,
        codec: Arc<dyn ColumnarCodec>,
        config: Arc<SplitConfig>,
    ) -> Self {
        Self {
            store,
            codec,
            config,
        }
    }

    /// Concurrency budget
    pub fn max_workers(&self) -> usize {
        self.config.max_workers.max(1)
    }

    /// Write every partition of `unit`
    ///
    /// Returns the qualified output locations in completion order.
    pub async fn write_all(&self, unit: &str, partitions: Vec<Partition>) -> Result<Vec<String>> {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.max_workers()));
        let mut tasks = JoinSet::new();

        for partition in partitions {
            let key = self.config.output_key(&partition.key, unit);
            let store = Arc::clone(&self.store);
            let codec = Arc::clone(&self.codec);
            let bucket = self.config.out_bucket.clone();
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.map_err(|e| {
                    Error::write_failure(store.location(&bucket, &key), e.to_string())
                })?;
                write_partition(store, codec, bucket, key, partition).await
            });
        }

        let submitted = tasks.len();
        let mut written = Vec::with_capacity(submitted);
        let mut first_error: Option<Error> = None;
        while let Some(joined) = tasks.join_next().await {
            match joined.map_err(Error::from).and_then(|result| result) {
                Ok(location) => written.push(location),
                Err(e) if first_error.is_none() => {
                    tracing::error!(
                        unit,
                        written = written.len(),
                        in_flight = tasks.len(),
                        error = %e,
                        "Partition write failed, draining remaining writes"
                    );
                    first_error = Some(e);
                }
                Err(e) => tracing::warn!(unit, error = %e, "Further partition write failed"),
            }
        }

        if let Some(e) = first_error {
            tracing::warn!(unit, orphaned = written.len(), "Partitions written without a marker");
            return Err(e);
        }

        tracing::debug!(
            unit,
            partitions = submitted,
            workers = self.max_workers(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Wrote partitions"
        );
        Ok(written)
    }
}

/// Encode one partition off the async threads, then upload it
async fn write_partition(
    store: Arc<dyn BlobStore>,
    codec: Arc<dyn ColumnarCodec>,
    bucket: String,
    key: String,
    partition: Partition,
) -> Result<String> {
    let location = store.location(&bucket, &key);
    let batch = partition.batch;

    let payload = tokio::task::spawn_blocking(move || codec.encode(&batch))
        .await?
        .map_err(|e| Error::write_failure(&location, e.to_string()))?;

    store
        .put(&bucket, &key, payload, PARQUET_CONTENT_TYPE)
        .await
        .map_err(|e| Error::write_failure(&location, e.to_string()))?;

    Ok(location)
}
