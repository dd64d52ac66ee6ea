//! Marker document
//!
//! Serialized field order and names are fixed; markers written by earlier
//! runs must keep parsing.

use crate::error::{Error, Result};
use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// `generated_at` format: UTC, second precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Record of one successfully processed unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMarker {
    /// Run label
    pub kind: String,

    /// Unit identifier
    pub date: String,

    /// Qualified input location
    pub input_key: String,

    /// Qualified output locations, in write completion order
    pub outputs: Vec<String>,

    /// Number of outputs
    pub output_count: usize,

    /// Creation time, `YYYY-MM-DDTHH:MM:SSZ`
    pub generated_at: String,
}

impl CompletionMarker {
    /// Build a marker stamped with `at`
    pub fn new(
        kind: impl Into<String>,
        date: impl Into<String>,
        input_key: impl Into<String>,
        outputs: Vec<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: kind.into(),
            date: date.into(),
            input_key: input_key.into(),
            output_count: outputs.len(),
            outputs,
            generated_at: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Serialize to UTF-8 JSON
    pub fn to_bytes(&self) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Parse a stored marker
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Parse `generated_at` back into a timestamp
    pub fn generated_at(&self) -> Result<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.generated_at, TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|e| {
                Error::Other(format!(
                    "Invalid marker timestamp '{}': {e}",
                    self.generated_at
                ))
            })
    }
}
