//! Resolving link targets against existing entries.

use std::collections::HashSet;

use qs_entry::{DOCUMENT_EXTENSION, SearchEntry};

/// Lookup of the names existing entries can be linked by.
///
/// A target resolves when it equals an entry path, equals a path once `.md` is appended, or
/// (for targets without a directory part) equals an entry basename. Matching ignores case.
#[derive(Debug, Default)]
pub struct LinkResolver {
    /// Lowercased paths of existing entries.
    paths: HashSet<String>,
    /// Lowercased basenames of existing entries.
    basenames: HashSet<String>,
}

impl LinkResolver {
    /// Indexes the concrete entries among `entries`; unresolved entries never satisfy a link.
    pub fn new<'a>(entries: impl IntoIterator<Item = &'a SearchEntry>) -> Self {
        let mut resolver = Self::default();
        for entry in entries.into_iter().filter(|e| !e.is_unresolved()) {
            resolver.paths.insert(entry.path.to_lowercase());
            resolver.basenames.insert(entry.basename.to_lowercase());
        }
        resolver
    }

    /// Returns true when `target` names an existing entry.
    pub fn resolves(&self, target: &str) -> bool {
        let target = target.trim().to_lowercase();
        if self.paths.contains(&target)
            || self
                .paths
                .contains(&format!("{target}.{DOCUMENT_EXTENSION}"))
        {
            return true;
        }
        !target.contains('/') && self.basenames.contains(&target)
    }

    /// Returns placeholder entries for the targets that resolve to nothing.
    ///
    /// Output follows first occurrence order and holds one entry per path.
    pub fn unresolved<'a>(&self, targets: impl IntoIterator<Item = &'a str>) -> Vec<SearchEntry> {
        let mut seen = HashSet::new();
        targets
            .into_iter()
            .filter(|t| !t.trim().is_empty() && !self.resolves(t))
            .map(SearchEntry::unresolved)
            .filter(|e| seen.insert(e.path.to_lowercase()))
            .collect()
    }
}
