//! Shared fixtures for unit tests

use crate::error::{Error, Result};
use crate::store::{BlobStore, ObjectStoreBlobStore};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A two-column table: `Item_ID` (utf8) and `qty` (int64)
pub fn sales_batch(ids: &[&str], qty: &[i64]) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Item_ID", DataType::Utf8, true),
        Field::new("qty", DataType::Int64, false),
    ]));
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(ids.to_vec())),
            Arc::new(Int64Array::from(qty.to_vec())),
        ],
    )
    .unwrap()
}

/// A table without the partition column
pub fn keyless_batch(qty: &[i64]) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![Field::new("qty", DataType::Int64, false)]));
    RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(qty.to_vec()))]).unwrap()
}

/// In-memory store over `memory://in` and `memory://out` that can be told
/// to fail or slow down operations, and counts what it sees
pub struct FlakyStore {
    inner: ObjectStoreBlobStore,
    fail_put: Option<String>,
    fail_get: Option<String>,
    put_delay: Option<Duration>,
    puts: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: ObjectStoreBlobStore::connect(["memory://in", "memory://out"]).unwrap(),
            fail_put: None,
            fail_get: None,
            put_delay: None,
            puts: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn fail_puts_containing(mut self, pattern: &str) -> Self {
        self.fail_put = Some(pattern.to_string());
        self
    }

    pub fn fail_gets_containing(mut self, pattern: &str) -> Self {
        self.fail_get = Some(pattern.to_string());
        self
    }

    pub fn with_put_delay_ms(mut self, ms: u64) -> Self {
        self.put_delay = Some(Duration::from_millis(ms));
        self
    }

    /// Successful puts so far
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for FlakyStore {
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        self.inner.list(bucket, prefix).await
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Bytes>> {
        if self.fail_get.as_deref().is_some_and(|p| key.contains(p)) {
            return Err(Error::store(key, "injected get failure"));
        }
        self.inner.get(bucket, key).await
    }

    async fn put(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.put_delay {
            tokio::time::sleep(delay).await;
        }
        let result = if self.fail_put.as_deref().is_some_and(|p| key.contains(p)) {
            Err(Error::store(key, "injected put failure"))
        } else {
            self.inner.put(bucket, key, data, content_type).await
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if result.is_ok() {
            self.puts.fetch_add(1, Ordering::SeqCst);
        }
        result
    }

    fn location(&self, bucket: &str, key: &str) -> String {
        self.inner.location(bucket, key)
    }
}
