//! Object store module
//!
//! The keyed blob namespace every other component reads from and writes to.
//!
//! # Overview
//!
//! - `BlobStore` - list / get / put capability, injected into components
//! - `ObjectStoreBlobStore` - `object_store` backed implementation
//! - `BucketSpec` - bucket URL parsing (S3, GCS, Azure, local, memory)

mod backend;
mod types;

pub use backend::{BucketSpec, ObjectStoreBlobStore, StoreScheme};
pub use types::{BlobStore, JSON_CONTENT_TYPE, PARQUET_CONTENT_TYPE};
