//! The path-keyed entry catalog.
//!
//! The catalog is the only owner of searchable entries. All mutation goes through its
//! methods, which keep `path` unique and mark the catalog dirty so the owner knows to
//! re-index once per batch. Storage is copy-on-write: a [`CatalogSnapshot`] taken before a
//! mutation keeps seeing the old entries.

use std::{
    collections::HashMap,
    mem,
    ops::Deref,
    sync::Arc,
};

use crate::SearchEntry;

/// Mutable, path-unique set of entries in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EntryCatalog {
    /// Entries in insertion order, shared with outstanding snapshots.
    entries: Arc<Vec<SearchEntry>>,
    /// Path -> position in `entries`.
    positions: HashMap<String, usize>,
    /// Incremented on every effective mutation.
    version: u64,
    /// Set by mutations, cleared by [`EntryCatalog::take_dirty`].
    dirty: bool,
}

/// An immutable view of the catalog at one version.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// The shared entries.
    entries: Arc<Vec<SearchEntry>>,
    /// Catalog version this snapshot was taken at.
    version: u64,
}

impl CatalogSnapshot {
    /// Returns the catalog version this snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Deref for CatalogSnapshot {
    type Target = [SearchEntry];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl EntryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from entries; a later entry replaces an earlier one with the same path.
    ///
    /// The result is dirty so that the first search indexes it.
    pub fn from_entries(entries: impl IntoIterator<Item = SearchEntry>) -> Self {
        let mut catalog = Self::new();
        catalog.replace_all(entries);
        catalog
    }

    /// Returns every entry in insertion order.
    pub fn all(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds an entry by path.
    pub fn find_by_path(&self, path: &str) -> Option<&SearchEntry> {
        self.positions.get(path).map(|&i| &self.entries[i])
    }

    /// Finds an entry by path ignoring case, preferring an exact match.
    pub fn find_by_path_ignore_case(&self, path: &str) -> Option<&SearchEntry> {
        if let Some(entry) = self.find_by_path(path) {
            return Some(entry);
        }
        let lower = path.to_lowercase();
        self.entries.iter().find(|e| e.path.to_lowercase() == lower)
    }

    /// Returns true when an entry with `path` exists.
    pub fn contains(&self, path: &str) -> bool {
        self.positions.contains_key(path)
    }

    /// Returns the current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns a consistent read-only view of the current entries.
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            entries: Arc::clone(&self.entries),
            version: self.version,
        }
    }

    /// Returns true when the catalog changed since the last [`EntryCatalog::take_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        mem::take(&mut self.dirty)
    }

    /// Inserts an entry, replacing any entry with the same path in place.
    ///
    /// Returns the replaced entry.
    pub fn upsert(&mut self, entry: SearchEntry) -> Option<SearchEntry> {
        let replaced = match self.positions.get(&entry.path) {
            Some(&i) => Some(mem::replace(
                &mut Arc::make_mut(&mut self.entries)[i],
                entry,
            )),
            None => {
                self.positions
                    .insert(entry.path.clone(), self.entries.len());
                Arc::make_mut(&mut self.entries).push(entry);
                None
            }
        };
        self.touch();
        replaced
    }

    /// Appends an entry unless its path is already present.
    ///
    /// Returns true when the entry was inserted.
    pub fn insert_if_absent(&mut self, entry: SearchEntry) -> bool {
        if self.contains(&entry.path) {
            return false;
        }
        self.upsert(entry);
        true
    }

    /// Removes the entry with `path`, preserving the order of the rest.
    pub fn remove_by_path(&mut self, path: &str) -> Option<SearchEntry> {
        let index = self.positions.remove(path)?;
        let removed = Arc::make_mut(&mut self.entries).remove(index);
        for (i, entry) in self.entries.iter().enumerate().skip(index) {
            self.positions.insert(entry.path.clone(), i);
        }
        self.touch();
        Some(removed)
    }

    /// Removes `old_path` and inserts `entry` in a single mutation.
    ///
    /// If `old_path` is absent this is a plain upsert. Returns the removed entry.
    pub fn rename(&mut self, old_path: &str, entry: SearchEntry) -> Option<SearchEntry> {
        let removed = if old_path == entry.path {
            None
        } else {
            self.remove_by_path(old_path)
        };
        let replaced = self.upsert(entry);
        removed.or(replaced)
    }

    /// Replaces the entry at `old_path` in place with `entry`, whose path may differ.
    ///
    /// Returns the replaced entry. Nothing changes when `old_path` is absent or another entry
    /// already holds `entry.path`.
    pub fn replace(&mut self, old_path: &str, entry: SearchEntry) -> Option<SearchEntry> {
        let index = *self.positions.get(old_path)?;
        if entry.path != old_path && self.positions.contains_key(&entry.path) {
            return None;
        }
        self.positions.remove(old_path);
        self.positions.insert(entry.path.clone(), index);
        let replaced = mem::replace(&mut Arc::make_mut(&mut self.entries)[index], entry);
        self.touch();
        Some(replaced)
    }

    /// Replaces the whole catalog contents.
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = SearchEntry>) {
        let mut fresh: Vec<SearchEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for entry in entries {
            match positions.get(&entry.path) {
                Some(&i) => fresh[i] = entry,
                None => {
                    positions.insert(entry.path.clone(), fresh.len());
                    fresh.push(entry);
                }
            }
        }
        self.entries = Arc::new(fresh);
        self.positions = positions;
        self.touch();
    }

    /// Records a mutation.
    fn touch(&mut self) {
        self.version += 1;
        self.dirty = true;
    }
}
