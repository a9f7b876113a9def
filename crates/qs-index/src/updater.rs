//! Incremental index maintenance.
//!
//! The [`IncrementalIndexUpdater`] is the single writer of the [`EntryCatalog`]. It applies
//! change notifications, keeps the filtered active subset in step with the catalog, and
//! re-indexes the engine exactly once after each notification or batch that changed anything.
//! Queries go through [`IncrementalIndexUpdater::search`], which only ever sees the engine
//! state built from the current catalog.

use std::{
    collections::{HashMap, HashSet},
    mem,
};

use qs_entry::{CatalogSnapshot, EntryCatalog, SearchEntry};
use qs_match::{FuzzyMatchEngine, RawCandidate};
use tracing::debug;

use crate::{EntryFilter, EntrySource, IndexError, LinkResolver};

/// A change notification from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEvent {
    /// A resource was created.
    Create(SearchEntry),
    /// The resource at a path was deleted.
    Delete(String),
    /// A resource moved.
    Rename {
        /// Path before the move.
        old_path: String,
        /// The entry at its new path.
        entry: SearchEntry,
    },
    /// Link resolution finished; carries every outgoing link target in the vault.
    ///
    /// Targets are compared with existing paths ignoring case.
    ResolveUnresolved(Vec<String>),
}

/// Owns the catalog and keeps the match engine consistent with it.
pub struct IncrementalIndexUpdater<E> {
    /// All entries.
    catalog: EntryCatalog,
    /// Defines the searchable subset.
    filter: EntryFilter,
    /// The match engine, indexed over `active`.
    engine: E,
    /// Catalog positions of the searchable entries, in engine order.
    active: Vec<usize>,
    /// Notifications waiting for [`IncrementalIndexUpdater::settle`].
    pending: Vec<IndexEvent>,
    /// Number of engine re-index calls so far.
    reindex_count: u64,
    /// Placeholders replaced by a created entry, keyed by the created path.
    displaced: HashMap<String, SearchEntry>,
}

impl<E: FuzzyMatchEngine> IncrementalIndexUpdater<E> {
    /// Creates an updater over an empty catalog.
    pub fn new(engine: E) -> Self {
        Self {
            catalog: EntryCatalog::new(),
            filter: EntryFilter::All,
            engine,
            active: Vec::new(),
            pending: Vec::new(),
            reindex_count: 0,
            displaced: HashMap::new(),
        }
    }

    /// Creates an updater over `entries` with `filter`, indexing once.
    pub fn with_entries(
        engine: E,
        filter: EntryFilter,
        entries: impl IntoIterator<Item = SearchEntry>,
    ) -> Self {
        let mut updater = Self::new(engine);
        updater.filter = filter;
        updater.catalog.replace_all(entries);
        updater.sync();
        updater
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &EntryCatalog {
        &self.catalog
    }

    /// Returns a consistent view of the catalog for readers on other threads.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.catalog.snapshot()
    }

    /// Returns the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the active filter.
    pub fn filter(&self) -> &EntryFilter {
        &self.filter
    }

    /// Returns the number of engine re-index calls made so far.
    pub fn reindex_count(&self) -> u64 {
        self.reindex_count
    }

    /// Returns the searchable entries, in engine order.
    pub fn active_entries(&self) -> impl Iterator<Item = &SearchEntry> {
        let all = self.catalog.all();
        self.active.iter().filter_map(|&i| all.get(i))
    }

    /// Returns the number of searchable entries.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Applies one notification; re-indexes once if the catalog changed.
    ///
    /// Returns true when the catalog changed.
    pub fn apply(&mut self, event: IndexEvent) -> bool {
        let changed = self.mutate(event);
        self.sync();
        changed
    }

    /// Applies notifications in order with at most one re-index.
    ///
    /// Returns how many of them changed the catalog.
    pub fn apply_batch(&mut self, events: impl IntoIterator<Item = IndexEvent>) -> usize {
        let changed = events
            .into_iter()
            .map(|event| self.mutate(event))
            .filter(|&changed| changed)
            .count();
        self.sync();
        changed
    }

    /// Queues a notification until the host reports that its metadata cache has settled.
    pub fn enqueue(&mut self, event: IndexEvent) {
        self.pending.push(event);
    }

    /// Returns the number of queued notifications.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Applies every queued notification as one batch.
    pub fn settle(&mut self) -> usize {
        let events = mem::take(&mut self.pending);
        debug!(events = events.len(), "settling queued notifications");
        self.apply_batch(events)
    }

    /// Replaces the catalog with everything `source` yields.
    ///
    /// Queued notifications are dropped, since the fresh catalog already reflects them.
    pub fn rebuild(
        &mut self,
        source: &impl EntrySource,
        include_unresolved: bool,
    ) -> Result<(), IndexError> {
        let entries = source.search_entries(include_unresolved)?;
        self.pending.clear();
        self.displaced.clear();
        self.catalog.replace_all(entries);
        self.sync();
        Ok(())
    }

    /// Changes the searchable subset and re-indexes once.
    pub fn set_filter(&mut self, filter: EntryFilter) {
        self.filter = filter;
        self.reindex();
    }

    /// Runs `query` through the engine and resolves matches to catalog entries.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<RawCandidate<'_>> {
        let all = self.catalog.all();
        self.engine
            .search(query, limit)
            .into_iter()
            .filter_map(|m| {
                let entry = self.active.get(m.entry_index).and_then(|&i| all.get(i))?;
                Some(RawCandidate {
                    entry,
                    score: m.score,
                    spans: m.spans,
                })
            })
            .collect()
    }

    /// Applies one notification to the catalog without re-indexing.
    fn mutate(&mut self, event: IndexEvent) -> bool {
        match event {
            IndexEvent::Create(entry) => self.place(entry, false),
            IndexEvent::Delete(path) => self.vacate(&path),
            IndexEvent::Rename { old_path, entry } => {
                if !self.catalog.contains(&old_path) {
                    return self.place(entry, false);
                }
                if self.displaced.contains_key(&old_path)
                    || self.placeholder_for(&entry).is_some()
                {
                    self.vacate(&old_path);
                    self.place(entry, true);
                } else {
                    self.catalog.rename(&old_path, entry);
                }
                true
            }
            IndexEvent::ResolveUnresolved(links) => self.resolve_unresolved(&links),
        }
    }

    /// Returns the path of the placeholder a concrete `entry` would take over.
    fn placeholder_for(&self, entry: &SearchEntry) -> Option<String> {
        if entry.is_unresolved() {
            return None;
        }
        self.catalog
            .find_by_path_ignore_case(&entry.path)
            .filter(|existing| existing.is_unresolved())
            .map(|existing| existing.path.clone())
    }

    /// Adds `entry`, taking over a placeholder for the same path.
    ///
    /// Without `overwrite`, an existing entry at the path wins and nothing changes.
    fn place(&mut self, entry: SearchEntry, overwrite: bool) -> bool {
        if let Some(placeholder) = self.placeholder_for(&entry) {
            let path = entry.path.clone();
            let Some(replaced) = self.catalog.replace(&placeholder, entry) else {
                return false;
            };
            self.displaced.insert(path, replaced);
            return true;
        }
        if overwrite {
            self.catalog.upsert(entry);
            true
        } else {
            self.catalog.insert_if_absent(entry)
        }
    }

    /// Removes the entry at `path`, putting back the placeholder it took over.
    fn vacate(&mut self, path: &str) -> bool {
        if let Some(placeholder) = self.displaced.remove(path)
            && self.catalog.replace(path, placeholder).is_some()
        {
            return true;
        }
        self.catalog.remove_by_path(path).is_some()
    }

    /// Appends placeholders for link targets no entry answers to.
    fn resolve_unresolved(&mut self, links: &[String]) -> bool {
        let linked: HashSet<String> = links
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| SearchEntry::unresolved(t).path.to_lowercase())
            .collect();
        self.displaced
            .retain(|_, placeholder| linked.contains(&placeholder.path.to_lowercase()));

        let mut taken: HashSet<String> = self
            .catalog
            .all()
            .iter()
            .map(|e| e.path.to_lowercase())
            .collect();
        let missing = LinkResolver::new(self.catalog.all())
            .unresolved(links.iter().map(String::as_str));
        missing
            .into_iter()
            .filter(|entry| taken.insert(entry.path.to_lowercase()))
            .map(|entry| self.catalog.insert_if_absent(entry))
            .fold(false, |any, inserted| any || inserted)
    }

    /// Re-indexes if the catalog changed since the last sync.
    fn sync(&mut self) {
        if self.catalog.take_dirty() {
            self.reindex();
        }
    }

    /// Re-derives the active subset and hands it to the engine.
    fn reindex(&mut self) {
        let all = self.catalog.all();
        self.active = all
            .iter()
            .enumerate()
            .filter(|(_, entry)| self.filter.matches(entry))
            .map(|(i, _)| i)
            .collect();
        let entries: Vec<&SearchEntry> = self.active.iter().map(|&i| &all[i]).collect();
        self.engine.reindex(&entries);
        self.reindex_count += 1;
        debug!(
            version = self.catalog.version(),
            active = self.active.len(),
            total = all.len(),
            filter = %self.filter,
            "reindexed"
        );
    }
}
