//! Store capability trait

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Content type of completion markers
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type of partition objects
pub const PARQUET_CONTENT_TYPE: &str = "application/vnd.apache.parquet";

/// Keyed blob namespace
///
/// Buckets are addressed by the strings the run was configured with
/// (`IN_BUCKET`, `OUT_BUCKET`), keys by their raw string form.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// List every key under `prefix`, fully materialized
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>>;

    /// Fetch an object; `None` iff it does not exist
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Bytes>>;

    /// Store an object, replacing any previous version
    async fn put(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()>;

    /// Fully-qualified location of a key, as recorded in markers
    fn location(&self, bucket: &str, key: &str) -> String;
}
