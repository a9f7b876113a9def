//! The approximate string matching primitive behind the ranker.
//!
//! [`FuzzyMatchEngine`] is the seam between the core and whichever matcher is plugged in. The
//! engine indexes a list of entries and answers queries with [`RawMatch`]es that refer back to
//! that list by position, so the caller can resolve them against the exact entries it indexed.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use qs_entry::{FieldKey, SearchEntry};

use crate::MatchSpan;

/// A match reported by an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Position of the entry in the slice last passed to [`FuzzyMatchEngine::reindex`].
    pub entry_index: usize,
    /// Base relevance score; higher is better.
    pub score: i64,
    /// Per-field matches.
    pub spans: Vec<MatchSpan>,
}

/// An approximate string matcher over entry fields.
pub trait FuzzyMatchEngine {
    /// Replaces the indexed collection.
    fn reindex(&mut self, entries: &[&SearchEntry]);

    /// Matches `query` against the indexed collection.
    ///
    /// Results are ordered best first; equal scores keep collection order. `limit` caps the
    /// number of results.
    fn search(&self, query: &str, limit: Option<usize>) -> Vec<RawMatch>;
}

/// Searchable field values of one indexed entry.
type IndexedFields = Vec<(FieldKey, String)>;

/// Skim-style fuzzy matcher over basename, aliases, title and headings.
pub struct SkimEngine {
    /// Case-insensitive skim matcher.
    matcher: SkimMatcherV2,
    /// Field values per indexed entry.
    fields: Vec<IndexedFields>,
}

impl Default for SkimEngine {
    fn default() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
            fields: Vec::new(),
        }
    }
}

impl SkimEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of indexed entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Matches one entry's fields, returning the best field score and the spans.
    fn match_entry(&self, fields: &IndexedFields, query: &str) -> Option<(i64, Vec<MatchSpan>)> {
        let mut best: Option<i64> = None;
        let mut spans = Vec::new();
        for (field, value) in fields {
            let Some((score, indices)) = self.matcher.fuzzy_indices(value, query) else {
                continue;
            };
            best = Some(best.map_or(score, |b| b.max(score)));
            spans.push(MatchSpan::from_indices(*field, value.as_str(), &indices));
        }
        best.map(|score| (score, spans))
    }
}

impl FuzzyMatchEngine for SkimEngine {
    fn reindex(&mut self, entries: &[&SearchEntry]) {
        self.fields = entries.iter().map(|&entry| indexed_fields(entry)).collect();
    }

    fn search(&self, query: &str, limit: Option<usize>) -> Vec<RawMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<RawMatch> = self
            .fields
            .iter()
            .enumerate()
            .filter_map(|(entry_index, fields)| {
                let (score, spans) = self.match_entry(fields, query)?;
                Some(RawMatch {
                    entry_index,
                    score,
                    spans,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        matches
    }
}

/// Collects the non-empty searchable values of an entry.
fn indexed_fields(entry: &SearchEntry) -> IndexedFields {
    let mut fields = Vec::new();
    for key in FieldKey::ALL {
        for value in entry.field_values(key) {
            if !value.is_empty() {
                fields.push((key, value.to_string()));
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use qs_entry::DocumentMeta;

    use super::*;

    fn entries() -> Vec<SearchEntry> {
        vec![
            SearchEntry::document(
                "Project Plan.md",
                DocumentMeta {
                    aliases: vec!["plan".into()],
                    title: None,
                    headings: vec!["Goals".into()],
                },
            ),
            SearchEntry::file("Budget.pdf"),
            SearchEntry::document(
                "Notes.md",
                DocumentMeta {
                    aliases: vec![],
                    title: Some("Quarterly Plan Notes".into()),
                    headings: vec![],
                },
            ),
        ]
    }

    fn engine_for(entries: &[SearchEntry]) -> SkimEngine {
        let mut engine = SkimEngine::new();
        let refs: Vec<&SearchEntry> = entries.iter().collect();
        engine.reindex(&refs);
        engine
    }

    #[test]
    fn test_search_matches_across_fields() {
        let entries = entries();
        let engine = engine_for(&entries);

        let results = engine.search("plan", None);
        let indices: Vec<usize> = results.iter().map(|m| m.entry_index).collect();

        assert!(indices.contains(&0));
        assert!(indices.contains(&2));
        assert!(!indices.contains(&1));

        let first = results.iter().find(|m| m.entry_index == 0).unwrap();
        let fields: Vec<FieldKey> = first.spans.iter().map(|s| s.field).collect();
        assert!(fields.contains(&FieldKey::Basename));
        assert!(fields.contains(&FieldKey::Aliases));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let entries = entries();
        let engine = engine_for(&entries);
        let results = engine.search("BUDGET", None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry_index, 1);
        assert_eq!(results[0].spans[0].ranges, vec![0..6]);
    }

    #[test]
    fn test_results_sorted_by_score() {
        let entries = entries();
        let engine = engine_for(&entries);
        let results = engine.search("plan", None);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_limit_truncates() {
        let entries = entries();
        let engine = engine_for(&entries);
        assert_eq!(engine.search("plan", Some(1)).len(), 1);
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let entries = entries();
        let engine = engine_for(&entries);
        assert!(engine.search("   ", None).is_empty());
    }

    #[test]
    fn test_reindex_replaces_collection() {
        let entries = entries();
        let mut engine = engine_for(&entries);
        assert_eq!(engine.len(), 3);

        engine.reindex(&[]);
        assert!(engine.is_empty());
        assert!(engine.search("plan", None).is_empty());
    }
}
