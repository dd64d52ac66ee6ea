//! Group-by-key splitting

use super::types::Partition;
use crate::error::{Error, Result};
use arrow::array::{Array, UInt32Array};
use arrow::compute::take_record_batch;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use std::collections::BTreeMap;

/// Key used for rows whose partition value is null
pub const NULL_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";

/// Splits tables by one key column
#[derive(Debug, Clone)]
pub struct Partitioner {
    key_column: String,
}

impl Partitioner {
    /// Create a partitioner for the given key column
    pub fn new(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
        }
    }

    /// The key column
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Split a table into one partition per distinct key value
    ///
    /// `source` names the table in errors. Rows keep their relative order
    /// inside each partition; partitions are ordered by rendered key.
    pub fn split(&self, batch: &RecordBatch, source: &str) -> Result<Vec<Partition>> {
        let index = batch
            .schema()
            .index_of(&self.key_column)
            .map_err(|_| Error::schema_violation(&self.key_column, source))?;
        let column = batch.column(index);

        let options = FormatOptions::default();
        let formatter = ArrayFormatter::try_new(column.as_ref(), &options)?;

        let mut groups: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for row in 0..batch.num_rows() {
            let key = if column.is_null(row) {
                NULL_PARTITION.to_string()
            } else {
                formatter.value(row).to_string()
            };
            groups.entry(key).or_default().push(row as u32);
        }

        let mut partitions = Vec::with_capacity(groups.len());
        for (key, rows) in groups {
            validate_key(&key)?;
            let indices = UInt32Array::from(rows);
            let sub = take_record_batch(batch, &indices)?;
            partitions.push(Partition::new(key, sub));
        }

        tracing::debug!(
            source,
            rows = batch.num_rows(),
            partitions = partitions.len(),
            "Split table"
        );
        Ok(partitions)
    }
}

/// A key value becomes one path segment of the output key
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::invalid_key(key, "empty value"));
    }
    if key.contains('/') {
        return Err(Error::invalid_key(key, "contains '/'"));
    }
    if key == "." || key == ".." {
        return Err(Error::invalid_key(key, "relative path segment"));
    }
    if key.chars().any(|c| c.is_ascii_control()) {
        return Err(Error::invalid_key(key, "contains a control character"));
    }
    Ok(())
}
