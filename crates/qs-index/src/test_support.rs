//! Test utilities for qs-index.

use qs_entry::{FieldKey, SearchEntry};
use qs_match::{FuzzyMatchEngine, MatchSpan, RawMatch};

/// Engine that records re-index calls and matches basenames by case-insensitive substring.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    /// Basenames in index order.
    pub names: Vec<String>,
    /// Number of reindex calls.
    pub reindexed: usize,
}

impl FuzzyMatchEngine for RecordingEngine {
    fn reindex(&mut self, entries: &[&SearchEntry]) {
        self.names = entries.iter().map(|e| e.basename.clone()).collect();
        self.reindexed += 1;
    }

    fn search(&self, query: &str, limit: Option<usize>) -> Vec<RawMatch> {
        let needle = query.trim();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut matches: Vec<RawMatch> = self
            .names
            .iter()
            .enumerate()
            .filter_map(|(entry_index, name)| {
                let start = find_ignore_case(name, needle)?;
                let indices: Vec<usize> = (start..start + needle.chars().count()).collect();
                Some(RawMatch {
                    entry_index,
                    score: 1,
                    spans: vec![MatchSpan::from_indices(
                        FieldKey::Basename,
                        name.as_str(),
                        &indices,
                    )],
                })
            })
            .collect();
        if let Some(limit) = limit {
            matches.truncate(limit);
        }
        matches
    }
}

/// Returns the char index of the first case-insensitive occurrence of a non-empty `needle`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let hay: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    hay.windows(needle.len()).position(|window| {
        window
            .iter()
            .zip(&needle)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_in_char_positions() {
        let mut engine = RecordingEngine::default();
        let entry = SearchEntry::file("İstanbul Notes.md");
        engine.reindex(&[&entry]);

        let found = engine.search("NOTES", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].spans[0].start(), Some(9));
        assert!(engine.search("rome", None).is_empty());
        assert_eq!(find_ignore_case("İstanbul", "istanbul"), None);
        assert_eq!(find_ignore_case("Ab", "abc"), None);
    }
}
