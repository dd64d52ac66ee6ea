//! Partition types

use arrow::record_batch::RecordBatch;

/// The rows of one unit sharing a partition key value
#[derive(Debug, Clone)]
pub struct Partition {
    /// Rendered key value, used as a path segment of the output key
    pub key: String,
    /// The rows, in their original relative order
    pub batch: RecordBatch,
}

impl Partition {
    /// Create a new partition
    pub fn new(key: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            key: key.into(),
            batch,
        }
    }

    /// Number of rows in the partition
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }
}
