//! Match spans and candidate types.

use std::ops::Range;

use qs_entry::{FieldKey, SearchEntry};
use serde::Serialize;

/// Where a query matched inside one field value of one entry.
///
/// Ranges are half-open and count chars (Unicode scalar values), not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    /// Field the value came from.
    pub field: FieldKey,
    /// The full field value that matched.
    pub value: String,
    /// Matched char ranges within `value`, in ascending order.
    pub ranges: Vec<Range<usize>>,
}

impl MatchSpan {
    /// Creates a span, collapsing sorted matched char indices into contiguous ranges.
    pub fn from_indices(field: FieldKey, value: impl Into<String>, indices: &[usize]) -> Self {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for &i in indices {
            match ranges.last_mut() {
                Some(last) if last.end == i => last.end = i + 1,
                _ => ranges.push(i..i + 1),
            }
        }
        Self {
            field,
            value: value.into(),
            ranges,
        }
    }

    /// Returns the length of the field value in chars.
    pub fn field_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Returns the number of matched chars, never more than the field length.
    pub fn matched_len(&self) -> usize {
        let len = self.field_len();
        let matched: usize = self
            .ranges
            .iter()
            .map(|r| r.end.min(len).saturating_sub(r.start))
            .sum();
        matched.min(len)
    }

    /// Returns the index of the first matched char.
    pub fn start(&self) -> Option<usize> {
        self.ranges.iter().map(|r| r.start).min()
    }

    /// Returns the length of the longest contiguous matched run.
    pub fn longest_run(&self) -> usize {
        self.ranges
            .iter()
            .map(|r| r.end.saturating_sub(r.start))
            .max()
            .unwrap_or(0)
    }
}

/// An entry the engine matched, before ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RawCandidate<'a> {
    /// The matched entry.
    pub entry: &'a SearchEntry,
    /// Base relevance score from the engine.
    pub score: i64,
    /// Per-field matches.
    pub spans: Vec<MatchSpan>,
}

impl RawCandidate<'_> {
    /// Returns spans of one field.
    pub fn spans_for(&self, field: FieldKey) -> impl Iterator<Item = &MatchSpan> {
        self.spans.iter().filter(move |s| s.field == field)
    }
}

/// The four ranking factors of a candidate, before multipliers are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RankFactors {
    /// Highest field weight among the spans.
    pub priority: f32,
    /// Fraction of the best span's field that matched.
    pub ratio: f32,
    /// How close to the start of its field the best span begins.
    pub position: f32,
    /// Number of spans across all fields.
    pub match_count: f32,
    /// Field of the best span, which set the other factors.
    pub best_field: Option<FieldKey>,
}

/// A candidate with its aggregate rank score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate<'a> {
    /// The underlying engine candidate.
    #[serde(flatten)]
    pub candidate: RawCandidate<'a>,
    /// Factor breakdown.
    pub factors: RankFactors,
    /// Weighted sum of the factors.
    pub rank_score: f32,
}

impl<'a> RankedCandidate<'a> {
    /// Returns the ranked entry.
    pub fn entry(&self) -> &'a SearchEntry {
        self.candidate.entry
    }
}
