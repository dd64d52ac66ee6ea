//! Error types for the splitter
//!
//! Every error that escapes a component ends the run. Benign per-unit
//! conditions (missing input, empty input) are not errors; they are
//! reported as [`crate::orchestrator::LoadOutcome`] values instead.

use thiserror::Error;

/// The main error type for the splitter
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid store URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Object Store Errors
    // ============================================================================
    #[error("Store error for {location}: {message}")]
    Store { location: String, message: String },

    #[error("Unknown bucket: {bucket}")]
    UnknownBucket { bucket: String },

    // ============================================================================
    // Codec Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Codec error: {message}")]
    Codec { message: String },

    // ============================================================================
    // Partitioning Errors
    // ============================================================================
    #[error("Partition column '{column}' missing in {location}")]
    SchemaViolation { column: String, location: String },

    #[error("Partition key value '{value}' cannot form an output key: {message}")]
    InvalidPartitionKey { value: String, message: String },

    // ============================================================================
    // Write Errors
    // ============================================================================
    #[error("Failed to write partition {location}: {message}")]
    WriteFailure { location: String, message: String },

    #[error("Failed to write marker {location}: {message}")]
    MarkerWrite { location: String, message: String },

    #[error("Write task failed to complete: {0}")]
    Join(#[from] tokio::task::JoinError),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a store error for a location
    pub fn store(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a codec error
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Create a schema violation error
    pub fn schema_violation(column: impl Into<String>, location: impl Into<String>) -> Self {
        Self::SchemaViolation {
            column: column.into(),
            location: location.into(),
        }
    }

    /// Create an invalid partition key error
    pub fn invalid_key(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPartitionKey {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a partition write error
    pub fn write_failure(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteFailure {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a marker write error
    pub fn marker_write(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MarkerWrite {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Whether the error signals a structural input problem that will recur
    /// for every unit, rather than a store-side failure
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Error::SchemaViolation { .. } | Error::InvalidPartitionKey { .. }
        )
    }

    /// Whether the error left partitions in the store without a marker
    pub fn may_leave_orphans(&self) -> bool {
        matches!(
            self,
            Error::WriteFailure { .. } | Error::Join(_) | Error::MarkerWrite { .. }
        )
    }
}

/// Result type alias for the splitter
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("IN_BUCKET");
        assert_eq!(err.to_string(), "Missing required config field: IN_BUCKET");

        let err = Error::schema_violation("Item_ID", "s3://in/daily/20250101.parquet");
        assert_eq!(
            err.to_string(),
            "Partition column 'Item_ID' missing in s3://in/daily/20250101.parquet"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::schema_violation("Item_ID", "x").is_schema_error());
        assert!(Error::invalid_key("a/b", "contains '/'").is_schema_error());
        assert!(!Error::write_failure("x", "boom").is_schema_error());

        assert!(Error::write_failure("x", "boom").may_leave_orphans());
        assert!(Error::marker_write("x", "boom").may_leave_orphans());
        assert!(!Error::config("bad").may_leave_orphans());
    }
}
