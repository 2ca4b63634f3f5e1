/*
 * citations.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Citation range compression.
 */

//! Citation range compression.
//!
//! A numeric citation marker such as `[5, 3, 4, 9]` links each bibliography
//! entry separately. This module collapses the numbers into sorted inclusive
//! ranges (`[3-5,9]`) and parses range text back into numeric bounds when a
//! range token is activated.
//!
//! ```rust
//! use ltx_addons_core::citations::{compress, render_marker};
//!
//! let ranges = compress([1, 2, 4, 5, 7]);
//! assert_eq!(render_marker(&ranges), "[1-2,4-5,7]");
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use ltx_error_reporting::DiagnosticMessageBuilder;
use thiserror::Error;

/// A bibliography index as printed in a citation anchor. Always positive.
pub type CitationNumber = u32;

/// Parse a citation anchor label.
///
/// Surrounding whitespace is ignored. Anything other than decimal digits,
/// and the label `0`, is malformed.
pub fn parse_label(label: &str) -> Option<CitationNumber> {
    let label = label.trim();
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    label.parse().ok().filter(|n| *n > 0)
}

/// The warning for a label [`parse_label`] rejects. Callers add the location.
pub fn malformed_label(label: &str) -> DiagnosticMessageBuilder {
    DiagnosticMessageBuilder::warning("Malformed Citation Label")
        .with_code("L-2-1")
        .problem(format!("`{}` is not a positive integer", label.trim()))
        .add_detail("The entry was left out of the citation ranges")
}

/// An inclusive run of citation numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CitationRange {
    pub start: CitationNumber,
    pub end: CitationNumber,
}

impl CitationRange {
    pub fn new(start: CitationNumber, end: CitationNumber) -> Self {
        Self { start, end }
    }

    pub fn single(n: CitationNumber) -> Self {
        Self { start: n, end: n }
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, n: CitationNumber) -> bool {
        self.start <= n && n <= self.end
    }

    /// The covered numbers. A reversed range covers nothing.
    pub fn numbers(&self) -> RangeInclusive<CitationNumber> {
        self.start..=self.end
    }
}

impl fmt::Display for CitationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Range text that is neither `n` nor `start-end`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid citation range `{text}`")]
pub struct RangeParseError {
    pub text: String,
}

impl FromStr for CitationRange {
    type Err = RangeParseError;

    /// Parse `"3"` or `"3-5"`. Whitespace around either number is allowed.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || RangeParseError {
            text: text.to_string(),
        };
        match text.split_once('-') {
            None => parse_label(text).map(CitationRange::single).ok_or_else(invalid),
            Some((start, end)) => {
                let start = parse_label(start).ok_or_else(invalid)?;
                let end = parse_label(end).ok_or_else(invalid)?;
                Ok(CitationRange::new(start, end))
            }
        }
    }
}

/// Collapse citation numbers into sorted, maximal inclusive ranges.
///
/// Input order is irrelevant. A repeated number neither extends nor breaks
/// the current run.
pub fn compress(numbers: impl IntoIterator<Item = CitationNumber>) -> Vec<CitationRange> {
    let mut sorted: Vec<CitationNumber> = numbers.into_iter().collect();
    sorted.sort_unstable();

    let mut ranges = Vec::new();
    let mut current: Option<CitationRange> = None;

    for n in sorted {
        current = Some(match current {
            None => CitationRange::single(n),
            Some(range) if n == range.end => range,
            Some(range) if range.end.checked_add(1) == Some(n) => CitationRange::new(range.start, n),
            Some(range) => {
                ranges.push(range);
                CitationRange::single(n)
            }
        });
    }

    if let Some(range) = current {
        ranges.push(range);
    }
    ranges
}

/// Every number covered by `ranges`.
pub fn expand(ranges: &[CitationRange]) -> BTreeSet<CitationNumber> {
    ranges.iter().flat_map(CitationRange::numbers).collect()
}

/// Bracketed, comma-joined display text. No ranges render as nothing.
pub fn render_marker(ranges: &[CitationRange]) -> String {
    if ranges.is_empty() {
        return String::new();
    }
    let joined = ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("[{}]", joined)
}

/// The numbers read from one citation marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationGroup {
    /// Parsed numbers in the order they were read, duplicates included.
    pub numbers: Vec<CitationNumber>,

    /// Labels that did not parse, in the order they were read.
    pub rejected: Vec<String>,
}

impl CitationGroup {
    pub fn from_labels<S: AsRef<str>>(labels: impl IntoIterator<Item = S>) -> Self {
        let mut group = CitationGroup::default();
        for label in labels {
            let label = label.as_ref();
            match parse_label(label) {
                Some(n) => group.numbers.push(n),
                None => group.rejected.push(label.to_string()),
            }
        }
        group
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn ranges(&self) -> Vec<CitationRange> {
        compress(self.numbers.iter().copied())
    }

    pub fn marker(&self) -> String {
        render_marker(&self.ranges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn marker(numbers: &[CitationNumber]) -> String {
        render_marker(&compress(numbers.iter().copied()))
    }

    #[test]
    fn test_single_number() {
        assert_eq!(marker(&[3]), "[3]");
    }

    #[test]
    fn test_consecutive_run() {
        assert_eq!(marker(&[1, 2, 3]), "[1-3]");
    }

    #[test]
    fn test_mixed_runs_and_singles() {
        assert_eq!(marker(&[1, 2, 4, 5, 7]), "[1-2,4-5,7]");
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        assert_eq!(marker(&[5, 3, 4]), "[3-5]");
    }

    #[test]
    fn test_duplicates_do_not_break_a_run() {
        assert_eq!(marker(&[2, 2, 3]), "[2-3]");
        assert_eq!(marker(&[4, 1, 4, 2, 1]), "[1-2,4]");
    }

    #[test]
    fn test_distinct_non_consecutive() {
        assert_eq!(marker(&[9, 1, 5]), "[1,5,9]");
    }

    #[test]
    fn test_empty_group_renders_nothing() {
        assert_eq!(marker(&[]), "");
    }

    #[test]
    fn test_max_value_does_not_overflow() {
        let ranges = compress([u32::MAX, u32::MAX - 1, 1]);
        assert_eq!(render_marker(&ranges), format!("[1,{}-{}]", u32::MAX - 1, u32::MAX));
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("12"), Some(12));
        assert_eq!(parse_label(" 7\n"), Some(7));
        assert_eq!(parse_label("0"), None);
        assert_eq!(parse_label("?"), None);
        assert_eq!(parse_label("-3"), None);
        assert_eq!(parse_label("+3"), None);
        assert_eq!(parse_label("3a"), None);
        assert_eq!(parse_label(""), None);
        assert_eq!(parse_label("99999999999"), None);
    }

    #[test]
    fn test_group_excludes_malformed_labels() {
        let group = CitationGroup::from_labels(["4", "?", "3", "Smith"]);
        assert_eq!(group.numbers, vec![4, 3]);
        assert_eq!(group.rejected, vec!["?", "Smith"]);
        assert_eq!(group.marker(), "[3-4]");

        let group = CitationGroup::from_labels(["?"]);
        assert!(group.is_empty());
        assert_eq!(group.marker(), "");
    }

    #[test]
    fn test_range_text_round_trip() {
        assert_eq!("3".parse::<CitationRange>(), Ok(CitationRange::single(3)));
        assert_eq!("3-5".parse::<CitationRange>(), Ok(CitationRange::new(3, 5)));
        assert_eq!(" 3 - 5 ".parse::<CitationRange>(), Ok(CitationRange::new(3, 5)));
        assert_eq!(CitationRange::new(3, 5).to_string(), "3-5");
        assert_eq!(CitationRange::single(9).to_string(), "9");
    }

    #[test]
    fn test_invalid_range_text() {
        for text in ["", "a", "3-", "-5", "1-2-3", "0-4", "3,5"] {
            let err = text.parse::<CitationRange>().unwrap_err();
            assert_eq!(err.text, text);
        }
    }

    #[test]
    fn test_reversed_range_covers_nothing() {
        let range: CitationRange = "5-3".parse().unwrap();
        assert_eq!(range.numbers().count(), 0);
        assert!(!range.contains(4));
    }

    proptest! {
        #[test]
        fn compress_then_expand_preserves_the_set(
            numbers in prop::collection::vec(1u32..200, 0..40)
        ) {
            let ranges = compress(numbers.iter().copied());
            let expected: BTreeSet<CitationNumber> = numbers.iter().copied().collect();
            prop_assert_eq!(expand(&ranges), expected);
        }

        #[test]
        fn ranges_are_sorted_disjoint_and_maximal(
            numbers in prop::collection::vec(1u32..200, 1..40)
        ) {
            let ranges = compress(numbers.iter().copied());
            for range in &ranges {
                prop_assert!(range.start <= range.end);
            }
            for pair in ranges.windows(2) {
                // A gap of at least one number separates neighbours.
                prop_assert!(pair[0].end + 1 < pair[1].start);
            }
        }

        #[test]
        fn rendered_tokens_parse_back(
            numbers in prop::collection::vec(1u32..1000, 1..20)
        ) {
            let ranges = compress(numbers.iter().copied());
            let rendered = render_marker(&ranges);
            let inner = rendered.trim_start_matches('[').trim_end_matches(']');
            let parsed: Vec<CitationRange> = inner
                .split(',')
                .map(|token| token.parse().unwrap())
                .collect();
            prop_assert_eq!(parsed, ranges);
        }
    }
}
