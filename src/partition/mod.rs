//! Partition module
//!
//! Splits one decoded table into disjoint sub-tables, one per distinct
//! value of the partition key column.
//!
//! # Overview
//!
//! - `Partition` - a key value and the rows carrying it
//! - `Partitioner` - groups a table by its key column
//!
//! Partitions come out in ascending key order so repeated runs over the same
//! input produce the same sequence.

mod splitter;
mod types;

pub use splitter::{Partitioner, NULL_PARTITION};
pub use types::Partition;

#[cfg(test)]
mod tests;
