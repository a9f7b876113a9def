//! Confidence scoring for a single span.
//!
//! `confidence = length_ratio * position_weight * similarity`, where
//!
//! - `length_ratio = min(longest_contiguous_run / query_len, 1)`
//! - `position_weight` is 1.0 when the span starts at the first char, 0.7 otherwise
//! - `similarity = (max_len - levenshtein) / max_len` between the field value and the query
//!
//! Lengths and edit distance count chars, and the comparison is case-insensitive. Any factor
//! whose denominator is zero contributes 0.

use crate::MatchSpan;

/// Position weight for spans that do not start at the first char.
pub const OFFSET_POSITION_WEIGHT: f32 = 0.7;

/// Scores how strongly `span` evidences that the user meant its field when typing `query`.
///
/// The result is in `[0, 1]`.
pub fn confidence(span: &MatchSpan, query: &str) -> f32 {
    let query = query.trim().to_lowercase();
    length_ratio(span, &query) * position_weight(span) * similarity(&span.value.to_lowercase(), &query)
}

/// Longest contiguous matched run relative to the query length, capped at 1.
fn length_ratio(span: &MatchSpan, query: &str) -> f32 {
    let query_len = query.chars().count();
    if query_len == 0 {
        return 0.0;
    }
    (span.longest_run() as f32 / query_len as f32).min(1.0)
}

/// Full weight for a match anchored at the start of the field.
fn position_weight(span: &MatchSpan) -> f32 {
    match span.start() {
        Some(0) => 1.0,
        _ => OFFSET_POSITION_WEIGHT,
    }
}

/// Normalized edit-distance similarity in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    let distance = levenshtein(a, b);
    (max_len - distance) as f32 / max_len as f32
}

/// Classic Levenshtein distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

#[cfg(test)]
mod tests {
    use qs_entry::FieldKey;

    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("same", "same"), 0);
        // Counts code points, not bytes
        assert_eq!(levenshtein("café", "cafe"), 1);
    }

    #[test]
    fn test_similarity_bounds() {
        assert!(approx(similarity("plan", "plan"), 1.0));
        assert!(approx(similarity("abcd", "wxyz"), 0.0));
        assert!(approx(similarity("", ""), 0.0));
    }

    #[test]
    fn test_exact_prefix_match() {
        let span = MatchSpan::from_indices(FieldKey::Aliases, "Plan", &[0, 1, 2, 3]);
        assert!(approx(confidence(&span, "plan"), 1.0));
    }

    #[test]
    fn test_offset_match() {
        // "plan" inside "Quarterly Plan Notes": run 4/4, offset 0.7, similarity 4/20
        let span = MatchSpan::from_indices(
            FieldKey::Title,
            "Quarterly Plan Notes",
            &[10, 11, 12, 13],
        );
        let expected = 1.0 * 0.7 * (4.0 / 20.0);
        assert!(approx(confidence(&span, "plan"), expected));
    }

    #[test]
    fn test_scattered_match_has_short_run() {
        // Run of 2 out of a 4-char query
        let span = MatchSpan::from_indices(FieldKey::Basename, "pxlxan", &[0, 2, 4, 5]);
        let expected = 0.5 * 1.0 * similarity("pxlxan", "plan");
        assert!(approx(confidence(&span, "plan"), expected));
    }

    #[test]
    fn test_length_ratio_is_capped() {
        let span = MatchSpan::from_indices(FieldKey::Basename, "abcdef", &[0, 1, 2, 3, 4, 5]);
        let c = confidence(&span, "ab");
        assert!(approx(c, similarity("abcdef", "ab")));
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        let span = MatchSpan::from_indices(FieldKey::Basename, "abc", &[0]);
        assert!(approx(confidence(&span, "   "), 0.0));

        let empty = MatchSpan::from_indices(FieldKey::Headings, "", &[]);
        assert!(approx(confidence(&empty, "abc"), 0.0));
    }
}
