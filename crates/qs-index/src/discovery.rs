//! Vault enumeration.
//!
//! Walks the vault root and turns every visible, non-excluded file into a [`SearchEntry`].
//! Markdown files are parsed for title, aliases, headings and outgoing links; the links feed
//! the unresolved-target computation.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use qs_config::{ExcludePatterns, Vault};
use qs_entry::{SearchEntry, parse_file};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{IndexError, LinkResolver};

/// A full catalog source.
pub trait EntrySource {
    /// Returns every entry, optionally followed by unresolved link targets.
    fn search_entries(&self, include_unresolved: bool) -> Result<Vec<SearchEntry>, IndexError>;
}

/// The result of walking a vault.
#[derive(Debug, Clone, Default)]
pub struct VaultScan {
    /// Entries for the files found.
    pub entries: Vec<SearchEntry>,
    /// Outgoing link targets across all documents, in discovery order.
    pub links: Vec<String>,
    /// Files that could not be read (vault-relative path, error message).
    pub skipped: Vec<(PathBuf, String)>,
}

impl VaultScan {
    /// Returns placeholder entries for link targets that resolve to no scanned entry.
    pub fn unresolved(&self) -> Vec<SearchEntry> {
        LinkResolver::new(&self.entries).unresolved(self.links.iter().map(String::as_str))
    }
}

/// Enumerates a vault directory.
#[derive(Debug, Clone)]
pub struct VaultSource {
    /// Vault root.
    root: PathBuf,
    /// Paths to leave out, relative to `root`.
    excludes: ExcludePatterns,
}

impl VaultSource {
    /// Creates a source for the vault at `root`.
    pub fn new(root: impl Into<PathBuf>, excludes: ExcludePatterns) -> Result<Self, IndexError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IndexError::VaultNotFound { path: root });
        }
        Ok(Self { root, excludes })
    }

    /// Creates a source from a configured vault.
    pub fn from_vault(vault: &Vault) -> Result<Self, IndexError> {
        let excludes = ExcludePatterns::compile(&vault.exclude)?;
        Self::new(&vault.path, excludes)
    }

    /// Returns the vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the vault.
    ///
    /// Hidden files and directories, symlinks and excluded paths are skipped. Files whose
    /// names are not valid UTF-8 are skipped with a warning, as are unreadable documents.
    pub fn scan(&self) -> VaultScan {
        let mut scan = VaultScan::default();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable vault entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if self.excludes.is_excluded(rel) {
                debug!(path = %rel.display(), "excluded");
                continue;
            }
            let Some(rel_path) = vault_path(rel) else {
                warn!(path = %rel.display(), "skipping non UTF-8 path");
                continue;
            };

            match parse_file(entry.path(), &rel_path) {
                Ok(parsed) => {
                    scan.entries.push(parsed.entry);
                    scan.links.extend(parsed.links);
                }
                Err(err) => {
                    warn!(path = %rel_path, error = %err, "skipping unreadable document");
                    scan.skipped.push((rel.to_path_buf(), err.to_string()));
                }
            }
        }

        debug!(
            root = %self.root.display(),
            entries = scan.entries.len(),
            links = scan.links.len(),
            skipped = scan.skipped.len(),
            "vault scanned"
        );
        scan
    }
}

impl EntrySource for VaultSource {
    fn search_entries(&self, include_unresolved: bool) -> Result<Vec<SearchEntry>, IndexError> {
        let scan = self.scan();
        let unresolved = if include_unresolved {
            scan.unresolved()
        } else {
            Vec::new()
        };
        let mut entries = scan.entries;
        entries.extend(unresolved);
        Ok(entries)
    }
}

impl EntrySource for Vec<SearchEntry> {
    fn search_entries(&self, include_unresolved: bool) -> Result<Vec<SearchEntry>, IndexError> {
        Ok(self
            .iter()
            .filter(|e| include_unresolved || !e.is_unresolved())
            .cloned()
            .collect())
    }
}

/// Checks if a file name is hidden (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

/// Joins the components of a vault-relative path with `/`.
fn vault_path(rel: &Path) -> Option<String> {
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    parts.map(|p| p.join("/"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn vault() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(
            root,
            "Project Plan.md",
            "---\naliases: [plan]\n---\n# Project Plan\n\n## Goals\n\nSee [[Budget]] and [[Someday]].\n",
        );
        write(root, "finance/Budget.md", "# Budget\n");
        write(root, "assets/scan.pdf", "%PDF");
        write(root, ".obsidian/workspace.json", "{}");
        write(root, ".trash/Old.md", "# Old\n");
        write(root, "drafts/Draft.md", "[[Nowhere]]");
        temp
    }

    fn paths(entries: &[SearchEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_scan_skips_hidden_and_excluded() {
        let temp = vault();
        let excludes = ExcludePatterns::compile(&["drafts/**".to_string()]).unwrap();
        let source = VaultSource::new(temp.path(), excludes).unwrap();

        let scan = source.scan();

        assert_eq!(
            paths(&scan.entries),
            ["Project Plan.md", "assets/scan.pdf", "finance/Budget.md"]
        );
        assert_eq!(scan.links, ["Budget", "Someday"]);
        assert!(scan.skipped.is_empty());
    }

    #[test]
    fn test_scan_parses_metadata() {
        let temp = vault();
        let source = VaultSource::new(temp.path(), ExcludePatterns::empty()).unwrap();
        let scan = source.scan();

        let plan = scan
            .entries
            .iter()
            .find(|e| e.path == "Project Plan.md")
            .unwrap();
        assert_eq!(plan.aliases(), ["plan"]);
        assert_eq!(plan.headings(), ["Project Plan", "Goals"]);
        // Title equal to the basename is dropped
        assert_eq!(plan.title(), None);
    }

    #[test]
    fn test_search_entries_appends_unresolved() {
        let temp = vault();
        let source = VaultSource::new(temp.path(), ExcludePatterns::empty()).unwrap();

        let with = source.search_entries(true).unwrap();
        let unresolved: Vec<&str> = with
            .iter()
            .filter(|e| e.is_unresolved())
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(unresolved, ["Someday.md", "Nowhere.md"]);

        let without = source.search_entries(false).unwrap();
        assert!(without.iter().all(|e| !e.is_unresolved()));
        assert_eq!(without.len(), 4);
    }

    #[test]
    fn test_missing_vault_is_error() {
        let temp = TempDir::new().unwrap();
        let err = VaultSource::new(temp.path().join("nope"), ExcludePatterns::empty()).unwrap_err();
        assert!(matches!(err, IndexError::VaultNotFound { .. }));
    }

    #[test]
    fn test_vec_source_filters_unresolved() {
        let entries = vec![SearchEntry::file("a.md"), SearchEntry::unresolved("b")];
        assert_eq!(entries.search_entries(true).unwrap().len(), 2);
        assert_eq!(paths(&entries.search_entries(false).unwrap()), ["a.md"]);
    }
}
