//! `object_store` backed blob store (S3, R2, GCS, Azure, local, memory)

use super::types::BlobStore;
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Storage backend behind a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScheme {
    /// AWS S3
    S3,
    /// Cloudflare R2 (S3-compatible)
    R2,
    /// Google Cloud Storage
    Gcs,
    /// Azure Blob Storage
    Azure,
    /// Local filesystem directory
    Local,
    /// Process-local memory
    Memory,
}

impl StoreScheme {
    /// URL scheme used in qualified locations
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreScheme::S3 => "s3",
            StoreScheme::R2 => "r2",
            StoreScheme::Gcs => "gs",
            StoreScheme::Azure => "az",
            StoreScheme::Local => "file",
            StoreScheme::Memory => "memory",
        }
    }
}

/// A bucket reference parsed from configuration
///
/// Supported formats:
/// - `my-bucket` or `s3://my-bucket` - AWS S3
/// - `r2://my-bucket` - Cloudflare R2
/// - `gs://my-bucket` - Google Cloud Storage
/// - `az://container` - Azure Blob Storage
/// - `file:///data/root`, `/data/root` or `./root` - Local filesystem
/// - `memory://name` - In-memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSpec {
    /// Backend kind
    pub scheme: StoreScheme,
    /// Bucket / container name, or root directory for local stores
    pub name: String,
}

impl BucketSpec {
    /// Parse a bucket reference
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(Error::config("Empty bucket reference"));
        }
        if spec.starts_with('/') || spec.starts_with('.') {
            return Ok(Self {
                scheme: StoreScheme::Local,
                name: spec.trim_end_matches('/').to_string(),
            });
        }
        if !spec.contains("://") {
            return Ok(Self {
                scheme: StoreScheme::S3,
                name: spec.to_string(),
            });
        }

        let url = Url::parse(spec)?;
        let scheme = match url.scheme() {
            "s3" | "s3a" => StoreScheme::S3,
            "r2" => StoreScheme::R2,
            "gs" | "gcs" => StoreScheme::Gcs,
            "az" | "azure" => StoreScheme::Azure,
            "file" => StoreScheme::Local,
            "memory" => StoreScheme::Memory,
            other => {
                return Err(Error::config(format!(
                    "Unsupported store scheme '{other}' in {spec}"
                )))
            }
        };

        let name = if scheme == StoreScheme::Local {
            url.path().trim_end_matches('/').to_string()
        } else {
            url.host_str()
                .ok_or_else(|| Error::config(format!("Missing bucket name in {spec}")))?
                .to_string()
        };

        Ok(Self { scheme, name })
    }

    /// Build the object store for this bucket
    pub fn build(&self) -> Result<Arc<dyn ObjectStore>> {
        let store: Arc<dyn ObjectStore> = match self.scheme {
            StoreScheme::S3 | StoreScheme::R2 => {
                let mut builder = AmazonS3Builder::from_env().with_bucket_name(&self.name);
                // R2 endpoint: https://<account_id>.r2.cloudflarestorage.com
                if self.scheme == StoreScheme::R2 {
                    if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                        builder = builder.with_endpoint(endpoint);
                    }
                }
                Arc::new(builder.build().map_err(|e| {
                    Error::config(format!("Failed to create {} client: {e}", self.scheme.as_str()))
                })?)
            }
            StoreScheme::Gcs => Arc::new(
                GoogleCloudStorageBuilder::from_env()
                    .with_bucket_name(&self.name)
                    .build()
                    .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?,
            ),
            StoreScheme::Azure => Arc::new(
                MicrosoftAzureBuilder::from_env()
                    .with_container_name(&self.name)
                    .build()
                    .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?,
            ),
            StoreScheme::Local => {
                std::fs::create_dir_all(&self.name).map_err(|e| {
                    Error::config(format!("Failed to create directory {}: {e}", self.name))
                })?;
                Arc::new(
                    LocalFileSystem::new_with_prefix(&self.name)
                        .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?,
                )
            }
            StoreScheme::Memory => Arc::new(InMemory::new()),
        };
        Ok(store)
    }

    /// Qualified location of a key in this bucket
    pub fn location(&self, key: &str) -> String {
        match self.scheme {
            StoreScheme::Local => format!("file://{}/{}", self.name, key.trim_start_matches('/')),
            _ => format!("{}://{}/{key}", self.scheme.as_str(), self.name),
        }
    }
}

/// A configured bucket with its backing store
#[derive(Debug, Clone)]
struct Bucket {
    spec: BucketSpec,
    store: Arc<dyn ObjectStore>,
}

impl Bucket {
    /// The local filesystem backend rejects object attributes
    fn supports_attributes(&self) -> bool {
        self.spec.scheme != StoreScheme::Local
    }

    /// Object path for a key, taken verbatim (no percent-encoding)
    fn path(&self, key: &str) -> Result<ObjectPath> {
        ObjectPath::parse(key).map_err(|e| Error::store(self.spec.location(key), e.to_string()))
    }
}

/// Blob store over one `object_store` client per bucket
#[derive(Debug, Clone, Default)]
pub struct ObjectStoreBlobStore {
    buckets: HashMap<String, Bucket>,
}

impl ObjectStoreBlobStore {
    /// Create an empty store with no buckets registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Build clients for every distinct bucket reference
    pub fn connect<'a>(buckets: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut this = Self::new();
        for reference in buckets {
            if this.buckets.contains_key(reference) {
                continue;
            }
            let spec = BucketSpec::parse(reference)?;
            let store = spec.build()?;
            tracing::debug!(bucket = reference, scheme = spec.scheme.as_str(), "Connected bucket");
            this.buckets
                .insert(reference.to_string(), Bucket { spec, store });
        }
        Ok(this)
    }

    fn bucket(&self, reference: &str) -> Result<&Bucket> {
        self.buckets.get(reference).ok_or_else(|| Error::UnknownBucket {
            bucket: reference.to_string(),
        })
    }
}

#[async_trait]
impl BlobStore for ObjectStoreBlobStore {
    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<String>> {
        let handle = self.bucket(bucket)?;
        let prefix_path = handle.path(prefix)?;
        let prefix_path = (!prefix_path.as_ref().is_empty()).then_some(prefix_path);

        let start = Instant::now();
        let keys: Vec<String> = handle
            .store
            .list(prefix_path.as_ref())
            .map_ok(|meta| meta.location.as_ref().to_string())
            .try_collect()
            .await
            .map_err(|e| Error::store(handle.spec.location(prefix), e.to_string()))?;

        tracing::debug!(
            location = %handle.spec.location(prefix),
            keys = keys.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Listed prefix"
        );
        Ok(keys)
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Bytes>> {
        let handle = self.bucket(bucket)?;
        let path = handle.path(key)?;
        let result = match handle.store.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(Error::store(handle.spec.location(key), e.to_string())),
        };
        match result.bytes().await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(Error::store(handle.spec.location(key), e.to_string())),
        }
    }

    async fn put(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> Result<()> {
        let handle = self.bucket(bucket)?;
        let path = handle.path(key)?;

        let mut attributes = Attributes::new();
        if handle.supports_attributes() {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        let opts = PutOptions {
            attributes,
            ..PutOptions::default()
        };

        handle
            .store
            .put_opts(&path, data.into(), opts)
            .await
            .map_err(|e| Error::store(handle.spec.location(key), e.to_string()))?;
        Ok(())
    }

    fn location(&self, bucket: &str, key: &str) -> String {
        match self.buckets.get(bucket) {
            Some(handle) => handle.spec.location(key),
            None => format!("{bucket}/{key}"),
        }
    }
}
