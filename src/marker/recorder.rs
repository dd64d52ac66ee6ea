//! Marker persistence

use super::types::CompletionMarker;
use crate::config::SplitConfig;
use crate::error::{Error, Result};
use crate::store::{BlobStore, JSON_CONTENT_TYPE};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Writes completion markers into the output bucket
#[derive(Clone)]
pub struct MarkerRecorder {
    store: Arc<dyn BlobStore>,
    config: Arc<SplitConfig>,
}

impl MarkerRecorder {
    /// Create a recorder for the configured marker prefix
    pub fn new(store: Arc<dyn BlobStore>, config: Arc<SplitConfig>) -> Self {
        Self { store, config }
    }

    /// Qualified location of a unit's marker
    pub fn location(&self, unit: &str) -> String {
        self.store
            .location(&self.config.out_bucket, &self.config.marker_key(unit))
    }

    /// Record a unit as done, stamped with the current time
    ///
    /// Only call once every partition of the unit has been written.
    pub async fn record(
        &self,
        unit: &str,
        input_location: &str,
        outputs: Vec<String>,
    ) -> Result<CompletionMarker> {
        self.record_at(unit, input_location, outputs, Utc::now())
            .await
    }

    /// Record a unit as done with an explicit timestamp
    pub async fn record_at(
        &self,
        unit: &str,
        input_location: &str,
        outputs: Vec<String>,
        at: DateTime<Utc>,
    ) -> Result<CompletionMarker> {
        let marker = CompletionMarker::new(&self.config.kind, unit, input_location, outputs, at);
        let key = self.config.marker_key(unit);
        let location = self.location(unit);

        let body = marker.to_bytes()?;
        self.store
            .put(&self.config.out_bucket, &key, body, JSON_CONTENT_TYPE)
            .await
            .map_err(|e| Error::marker_write(&location, e.to_string()))?;

        tracing::info!(
            kind = %self.config.kind,
            unit,
            outputs = marker.output_count,
            "[MARK] written -> {location}"
        );
        Ok(marker)
    }

    /// Load a unit's marker, if one exists
    pub async fn read(&self, unit: &str) -> Result<Option<CompletionMarker>> {
        let key = self.config.marker_key(unit);
        match self.store.get(&self.config.out_bucket, &key).await? {
            Some(bytes) => Ok(Some(CompletionMarker::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }
}
