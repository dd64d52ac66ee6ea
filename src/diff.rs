//! Outstanding-work computation from object listings
//!
//! A unit is input-eligible when `<unit>.parquet` exists under the input
//! prefix and done when `<unit>.json` exists under the marker prefix. The
//! outstanding set is the difference, in ascending order.

use crate::config::{INPUT_EXTENSION, MARKER_EXTENSION};
use std::collections::BTreeSet;

/// Unit identifier of a location: the final path segment minus `.{extension}`
///
/// Returns `None` for locations with another extension or an empty stem.
pub fn unit_id<'a>(location: &'a str, extension: &str) -> Option<&'a str> {
    let base = location.rsplit('/').next().unwrap_or(location);
    let stem = base.strip_suffix(extension)?.strip_suffix('.')?;
    (!stem.is_empty()).then_some(stem)
}

/// Collect the distinct unit identifiers of a listing
pub fn unit_ids<I, S>(locations: I, extension: &str) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    locations
        .into_iter()
        .filter_map(|location| unit_id(location.as_ref(), extension).map(str::to_string))
        .collect()
}

/// Units with eligible input and no marker, ascending
pub fn outstanding(inputs: &BTreeSet<String>, done: &BTreeSet<String>) -> Vec<String> {
    inputs.difference(done).cloned().collect()
}

/// Input and marker listings reduced to unit sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySetDiff {
    /// Units with an input object
    pub input_units: BTreeSet<String>,
    /// Units with a completion marker
    pub done_units: BTreeSet<String>,
    /// Input units without a marker, ascending
    pub outstanding: Vec<String>,
}

impl KeySetDiff {
    /// Diff an input listing against a marker listing
    pub fn compute<I, M, S, T>(input_locations: I, marker_locations: M) -> Self
    where
        I: IntoIterator<Item = S>,
        M: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let input_units = unit_ids(input_locations, INPUT_EXTENSION);
        let done_units = unit_ids(marker_locations, MARKER_EXTENSION);
        let outstanding = outstanding(&input_units, &done_units);
        Self {
            input_units,
            done_units,
            outstanding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("daily/20250101.parquet", "parquet", Some("20250101") ; "nested key")]
    #[test_case("20250101.parquet", "parquet", Some("20250101") ; "bare key")]
    #[test_case("a/b/c/20250101.json", "json", Some("20250101") ; "deep marker")]
    #[test_case("daily/20250101.json", "parquet", None ; "wrong extension")]
    #[test_case("daily/20250101parquet", "parquet", None ; "missing dot")]
    #[test_case("daily/.parquet", "parquet", None ; "empty stem")]
    #[test_case("daily/20250101.tar.parquet", "parquet", Some("20250101.tar") ; "inner dots kept")]
    fn test_unit_id(location: &str, extension: &str, expected: Option<&str>) {
        assert_eq!(unit_id(location, extension), expected);
    }

    #[test]
    fn test_outstanding_is_sorted_difference() {
        let diff = KeySetDiff::compute(
            [
                "daily/20250115.parquet",
                "daily/20250101.parquet",
                "daily/20250108.parquet",
            ],
            ["marker/20250108.json"],
        );
        assert_eq!(diff.outstanding, vec!["20250101", "20250115"]);
        assert_eq!(diff.input_units.len(), 3);
        assert_eq!(diff.done_units.len(), 1);
    }

    #[test]
    fn test_duplicates_and_foreign_keys_are_ignored() {
        let diff = KeySetDiff::compute(
            [
                "daily/20250101.parquet",
                "backfill/20250101.parquet",
                "daily/_SUCCESS",
                "daily/20250102.csv",
            ],
            [
                "marker/20250101.parquet",
                "marker/notes.txt",
                "marker/20250109.json",
            ],
        );
        assert_eq!(diff.input_units, BTreeSet::from(["20250101".to_string()]));
        assert_eq!(diff.done_units, BTreeSet::from(["20250109".to_string()]));
        assert_eq!(diff.outstanding, vec!["20250101"]);
    }

    #[test]
    fn test_markers_without_inputs_do_not_matter() {
        let diff = KeySetDiff::compute(
            ["daily/20250101.parquet"],
            ["marker/20250101.json", "marker/20241231.json"],
        );
        assert!(diff.outstanding.is_empty());
    }

    #[test]
    fn test_empty_listings() {
        let diff = KeySetDiff::compute(Vec::<String>::new(), Vec::<String>::new());
        assert_eq!(diff, KeySetDiff::default());
    }
}
