//! Tests for partition module

use super::*;
use crate::error::Error;
use crate::testing::{keyless_batch, sales_batch};
use arrow::array::{Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn qty_of(partition: &Partition) -> Vec<i64> {
    partition
        .batch
        .column(1)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap()
        .values()
        .to_vec()
}

// ============================================================================
// Grouping Tests
// ============================================================================

#[test]
fn test_split_groups_by_key() {
    let batch = sales_batch(&["A", "A", "B"], &[1, 2, 3]);
    let partitions = Partitioner::new("Item_ID").split(&batch, "t").unwrap();

    let keys: Vec<&str> = partitions.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B"]);
    assert_eq!(partitions[0].num_rows(), 2);
    assert_eq!(partitions[1].num_rows(), 1);
    assert_eq!(qty_of(&partitions[0]), vec![1, 2]);
    assert_eq!(qty_of(&partitions[1]), vec![3]);
}

#[test]
fn test_split_is_complete_and_disjoint() {
    let ids = ["C", "A", "B", "A", "C", "C", "D"];
    let qty: Vec<i64> = (0..ids.len() as i64).collect();
    let batch = sales_batch(&ids, &qty);

    let partitions = Partitioner::new("Item_ID").split(&batch, "t").unwrap();

    let mut seen: Vec<i64> = partitions.iter().flat_map(qty_of).collect();
    seen.sort_unstable();
    assert_eq!(seen, qty);

    for partition in &partitions {
        let keys = partition
            .batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert!(keys.iter().all(|k| k == Some(partition.key.as_str())));
    }
}

#[test]
fn test_split_keeps_schema() {
    let batch = sales_batch(&["A", "B"], &[1, 2]);
    let partitions = Partitioner::new("Item_ID").split(&batch, "t").unwrap();
    for partition in partitions {
        assert_eq!(partition.batch.schema(), batch.schema());
    }
}

#[test]
fn test_split_empty_table() {
    let batch = sales_batch(&[], &[]);
    let partitions = Partitioner::new("Item_ID").split(&batch, "t").unwrap();
    assert!(partitions.is_empty());
}

#[test]
fn test_split_integer_keys() {
    let schema = Arc::new(Schema::new(vec![Field::new("store", DataType::Int64, false)]));
    let batch = RecordBatch::try_new(
        schema,
        vec![Arc::new(Int64Array::from(vec![10, 7, 10]))],
    )
    .unwrap();

    let partitions = Partitioner::new("store").split(&batch, "t").unwrap();
    let keys: Vec<&str> = partitions.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["10", "7"]);
}

#[test]
fn test_null_keys_form_their_own_partition() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Item_ID", DataType::Utf8, true),
        Field::new("qty", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec![Some("A"), None, None])),
            Arc::new(Int64Array::from(vec![1, 2, 3])),
        ],
    )
    .unwrap();

    let partitions = Partitioner::new("Item_ID").split(&batch, "t").unwrap();
    assert_eq!(partitions.len(), 2);
    let null_partition = partitions.iter().find(|p| p.key == NULL_PARTITION).unwrap();
    assert_eq!(null_partition.num_rows(), 2);
    assert!(null_partition.batch.column(0).is_null(0));
}

#[test]
fn test_reserved_characters_are_kept_verbatim() {
    let batch = sales_batch(&["B%2", "A#1", "C 3", "A#1"], &[1, 2, 3, 4]);
    let partitions = Partitioner::new("Item_ID").split(&batch, "t").unwrap();

    let keys: Vec<&str> = partitions.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["A#1", "B%2", "C 3"]);
    assert_eq!(qty_of(&partitions[0]), vec![2, 4]);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_missing_key_column_is_schema_violation() {
    let batch = keyless_batch(&[1, 2]);
    let partitioner = Partitioner::new("Item_ID");

    let err = partitioner.split(&batch, "s3://in/daily/1.parquet").unwrap_err();
    match err {
        Error::SchemaViolation { column, location } => {
            assert_eq!(column, "Item_ID");
            assert_eq!(location, "s3://in/daily/1.parquet");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unroutable_keys_are_rejected() {
    for bad in ["a/b", "", "..", "tab\there"] {
        let batch = sales_batch(&[bad], &[1]);
        let err = Partitioner::new("Item_ID").split(&batch, "t").unwrap_err();
        assert!(matches!(err, Error::InvalidPartitionKey { .. }), "{bad}");
    }
}
