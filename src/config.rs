//! Job configuration
//!
//! A [`SplitConfig`] is built once (by the CLI or by a test) and handed to
//! every component. It also owns the object key conventions, which must stay
//! bit-exact so markers from earlier runs keep matching.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Extension of input objects
pub const INPUT_EXTENSION: &str = "parquet";

/// Extension of output partition objects
pub const OUTPUT_EXTENSION: &str = "parquet";

/// Extension of completion markers
pub const MARKER_EXTENSION: &str = "json";

/// Default concurrency budget for partition writes
pub const DEFAULT_MAX_WORKERS: usize = 24;

/// Default partition key column
pub const DEFAULT_PARTITION_COLUMN: &str = "Item_ID";

// ============================================================================
// Split Config
// ============================================================================

/// Complete configuration for one splitter run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Free-form label stamped into markers and logs
    pub kind: String,

    /// Bucket holding the input snapshots
    pub in_bucket: String,

    /// Bucket receiving partitions and markers
    pub out_bucket: String,

    /// Key prefix of input snapshots
    pub in_prefix: String,

    /// Key prefix of output partitions
    pub out_prefix: String,

    /// Key prefix of completion markers (in the output bucket)
    pub marker_prefix: String,

    /// Concurrency budget for partition writes
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Column the rows are split by
    #[serde(default = "default_partition_column")]
    pub partition_column: String,
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

fn default_partition_column() -> String {
    DEFAULT_PARTITION_COLUMN.to_string()
}

impl SplitConfig {
    /// Create a config with normalized prefixes and default tuning
    pub fn new(
        kind: impl Into<String>,
        in_bucket: impl Into<String>,
        out_bucket: impl Into<String>,
        in_prefix: &str,
        out_prefix: &str,
        marker_prefix: &str,
    ) -> Self {
        Self {
            kind: kind.into(),
            in_bucket: in_bucket.into(),
            out_bucket: out_bucket.into(),
            in_prefix: normalize_prefix(in_prefix),
            out_prefix: normalize_prefix(out_prefix),
            marker_prefix: normalize_prefix(marker_prefix),
            max_workers: DEFAULT_MAX_WORKERS,
            partition_column: DEFAULT_PARTITION_COLUMN.to_string(),
        }
    }

    /// Set the concurrency budget
    #[must_use]
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Set the partition key column
    #[must_use]
    pub fn with_partition_column(mut self, column: impl Into<String>) -> Self {
        self.partition_column = column.into();
        self
    }

    /// Check that the config can drive a run
    pub fn validate(&self) -> Result<()> {
        if self.kind.trim().is_empty() {
            return Err(Error::missing_field("KIND"));
        }
        if self.in_bucket.trim().is_empty() {
            return Err(Error::missing_field("IN_BUCKET"));
        }
        if self.out_bucket.trim().is_empty() {
            return Err(Error::missing_field("OUT_BUCKET"));
        }
        if self.max_workers == 0 {
            return Err(Error::invalid_value("MAX_WORKERS", "must be at least 1"));
        }
        if self.partition_column.is_empty() {
            return Err(Error::invalid_value(
                "PARTITION_COLUMN",
                "must not be empty",
            ));
        }
        for (field, prefix) in [
            ("IN_PREFIX", &self.in_prefix),
            ("OUT_PREFIX", &self.out_prefix),
            ("MARKER_PREFIX", &self.marker_prefix),
        ] {
            if !prefix.ends_with('/') || prefix.ends_with("//") {
                return Err(Error::invalid_value(
                    field,
                    format!("'{prefix}' is not normalized"),
                ));
            }
        }
        Ok(())
    }

    /// Input key for a unit: `{IN_PREFIX}{unit}.parquet`
    pub fn input_key(&self, unit: &str) -> String {
        format!("{}{unit}.{INPUT_EXTENSION}", self.in_prefix)
    }

    /// Output key for one partition: `{OUT_PREFIX}{key}/{unit}.parquet`
    pub fn output_key(&self, key_value: &str, unit: &str) -> String {
        format!("{}{key_value}/{unit}.{OUTPUT_EXTENSION}", self.out_prefix)
    }

    /// Marker key for a unit: `{MARKER_PREFIX}{unit}.json`
    pub fn marker_key(&self, unit: &str) -> String {
        format!("{}{unit}.{MARKER_EXTENSION}", self.marker_prefix)
    }
}

/// Strip trailing separators and append exactly one
pub fn normalize_prefix(prefix: &str) -> String {
    format!("{}/", prefix.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn config() -> SplitConfig {
        SplitConfig::new("pos", "in-bucket", "out-bucket", "daily", "split/", "marker//")
    }

    #[test_case("daily", "daily/" ; "no separator")]
    #[test_case("daily/", "daily/" ; "one separator")]
    #[test_case("daily///", "daily/" ; "many separators")]
    #[test_case("a/b", "a/b/" ; "nested")]
    #[test_case("", "/" ; "empty")]
    fn test_normalize_prefix(input: &str, expected: &str) {
        assert_eq!(normalize_prefix(input), expected);
    }

    #[test]
    fn test_new_normalizes_prefixes() {
        let config = config();
        assert_eq!(config.in_prefix, "daily/");
        assert_eq!(config.out_prefix, "split/");
        assert_eq!(config.marker_prefix, "marker/");
        assert_eq!(config.max_workers, DEFAULT_MAX_WORKERS);
        assert_eq!(config.partition_column, "Item_ID");
    }

    #[test]
    fn test_key_conventions() {
        let config = config();
        assert_eq!(config.input_key("20250101"), "daily/20250101.parquet");
        assert_eq!(config.output_key("A", "20250101"), "split/A/20250101.parquet");
        assert_eq!(config.marker_key("20250101"), "marker/20250101.json");
    }

    #[test]
    fn test_validate() {
        assert!(config().validate().is_ok());

        let err = config().with_max_workers(0).validate().unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "MAX_WORKERS")
        );

        let mut missing = config();
        missing.in_bucket = String::new();
        let err = missing.validate().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "IN_BUCKET"));

        let mut raw = config();
        raw.out_prefix = "split".to_string();
        assert!(raw.validate().is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let json = r#"{
            "kind": "pos",
            "in_bucket": "in",
            "out_bucket": "out",
            "in_prefix": "daily/",
            "out_prefix": "split/",
            "marker_prefix": "marker/"
        }"#;
        let config: SplitConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_workers, 24);
        assert_eq!(config.partition_column, "Item_ID");
    }
}
