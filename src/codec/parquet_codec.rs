//! Parquet codec
//!
//! Reads a whole Parquet object into a single RecordBatch and writes a
//! RecordBatch into an in-memory, snappy-compressed Parquet object.

use super::ColumnarCodec;
use crate::error::{Error, Result};
use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

/// Compression applied to every partition object
pub const OUTPUT_COMPRESSION: Compression = Compression::SNAPPY;

/// Parquet implementation of [`ColumnarCodec`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ParquetCodec;

impl ParquetCodec {
    /// Create a codec
    pub fn new() -> Self {
        Self
    }

    fn writer_properties() -> WriterProperties {
        WriterProperties::builder()
            .set_compression(OUTPUT_COMPRESSION)
            .build()
    }
}

impl ColumnarCodec for ParquetCodec {
    fn decode(&self, data: Bytes) -> Result<RecordBatch> {
        let builder = ParquetRecordBatchReaderBuilder::try_new(data)?;
        let schema = builder.schema().clone();
        let reader = builder.build()?;

        // One batch per row group (or reader batch); the pipeline wants one table
        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(concat_batches(&schema, &batches)?)
    }

    fn encode(&self, batch: &RecordBatch) -> Result<Bytes> {
        let mut buf = Vec::new();
        let props = Self::writer_properties();
        let mut writer = ArrowWriter::try_new(&mut buf, batch.schema(), Some(props))
            .map_err(|e| Error::codec(format!("Failed to create Parquet writer: {e}")))?;

        writer
            .write(batch)
            .map_err(|e| Error::codec(format!("Failed to write batch: {e}")))?;
        writer
            .close()
            .map_err(|e| Error::codec(format!("Failed to close Parquet writer: {e}")))?;

        Ok(Bytes::from(buf))
    }
}
