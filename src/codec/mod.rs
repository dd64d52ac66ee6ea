//! Columnar codec module
//!
//! Turns stored bytes into an Arrow table and back.
//!
//! # Overview
//!
//! - `ColumnarCodec` - decode/encode capability injected into the pipeline
//! - `ParquetCodec` - Parquet implementation (snappy)

mod parquet_codec;

pub use parquet_codec::{ParquetCodec, OUTPUT_COMPRESSION};

use crate::error::Result;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;

/// Decode bytes into a table and encode a table into bytes
///
/// A decode followed by an encode must preserve the rows and the declared
/// schema of the data.
pub trait ColumnarCodec: Send + Sync {
    /// Decode a whole object into one table
    fn decode(&self, data: Bytes) -> Result<RecordBatch>;

    /// Encode a table into one object
    fn encode(&self, batch: &RecordBatch) -> Result<Bytes>;
}
