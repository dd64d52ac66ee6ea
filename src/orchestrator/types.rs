//! Orchestrator types
//!
//! Per-unit states and outcomes, and the run summary.

use crate::diff::KeySetDiff;
use crate::marker::CompletionMarker;
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::fmt;

/// Where a unit is in its lifecycle
///
/// `Aborted` is only ever logged: a unit that aborts ends the run, and the
/// error returned from the orchestrator stands in for its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    /// Outstanding, not yet touched
    Pending,
    /// Input decoded
    Loaded,
    /// Rows grouped by key
    Partitioned,
    /// Every partition durable
    Written,
    /// Marker durable (terminal)
    Marked,
    /// Input vanished between listing and read (terminal)
    SkippedMissing,
    /// Input has no rows (terminal)
    SkippedEmpty,
    /// Fatal error; the run ends here (terminal)
    Aborted,
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitState::Pending => "pending",
            UnitState::Loaded => "loaded",
            UnitState::Partitioned => "partitioned",
            UnitState::Written => "written",
            UnitState::Marked => "marked",
            UnitState::SkippedMissing => "skipped_missing",
            UnitState::SkippedEmpty => "skipped_empty",
            UnitState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Result of loading a unit's input
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Decoded table with at least one row
    Loaded(RecordBatch),
    /// No object at the input key
    Missing,
    /// Object decoded to zero rows
    Empty,
}

/// Terminal outcome of a unit that did not abort the run
#[derive(Debug, Clone)]
pub enum UnitOutcome {
    /// Partitions and marker written
    Marked(CompletionMarker),
    /// Input absent at read time; retried next run
    SkippedMissing,
    /// Input empty; retried next run
    SkippedEmpty,
}

impl UnitOutcome {
    /// Terminal state this outcome corresponds to
    pub fn state(&self) -> UnitState {
        match self {
            UnitOutcome::Marked(_) => UnitState::Marked,
            UnitOutcome::SkippedMissing => UnitState::SkippedMissing,
            UnitOutcome::SkippedEmpty => UnitState::SkippedEmpty,
        }
    }
}

/// Summary of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Run label
    pub kind: String,
    /// Units with an input object
    pub input_units: usize,
    /// Units already marked before this run
    pub done_units: usize,
    /// Units outstanding at the start of the run, ascending
    pub outstanding: Vec<String>,
    /// Units marked by this run
    pub processed: usize,
    /// Units skipped because the input vanished
    pub skipped_missing: Vec<String>,
    /// Units skipped because the input had no rows
    pub skipped_empty: Vec<String>,
}

impl RunSummary {
    /// Start a summary from the listing diff
    pub fn from_plan(kind: impl Into<String>, diff: &KeySetDiff) -> Self {
        Self {
            kind: kind.into(),
            input_units: diff.input_units.len(),
            done_units: diff.done_units.len(),
            outstanding: diff.outstanding.clone(),
            ..Self::default()
        }
    }

    /// Record a unit outcome
    pub fn record(&mut self, unit: &str, outcome: &UnitOutcome) {
        match outcome {
            UnitOutcome::Marked(_) => self.processed += 1,
            UnitOutcome::SkippedMissing => self.skipped_missing.push(unit.to_string()),
            UnitOutcome::SkippedEmpty => self.skipped_empty.push(unit.to_string()),
        }
    }
}
