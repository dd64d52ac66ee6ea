//! Completion marker module
//!
//! A marker is the durable proof that a unit was fully processed. Its
//! presence under the marker prefix is the only state consulted when the
//! next run decides what is outstanding.
//!
//! # Overview
//!
//! - `CompletionMarker` - the JSON document
//! - `MarkerRecorder` - sole writer (and reader) of markers

mod recorder;
mod types;

pub use recorder::MarkerRecorder;
pub use types::{CompletionMarker, TIMESTAMP_FORMAT};
