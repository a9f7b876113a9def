//! Searchable entries for qs.
//!
//! This crate owns the data the switcher searches over:
//! - [`SearchEntry`], a tagged variant over files, unresolved link targets and web links
//! - [`EntryCatalog`], the single-writer, path-keyed set of entries with copy-on-write snapshots
//! - Markdown metadata extraction: YAML frontmatter (title, aliases), headings and outgoing links

#![warn(missing_docs)]

mod catalog;
mod document;
mod entry;
mod error;
mod field;
mod frontmatter;
mod markdown;

pub use catalog::{CatalogSnapshot, EntryCatalog};
pub use document::{ParsedEntry, parse_file, parse_markdown};
pub use entry::{DOCUMENT_EXTENSION, DocumentMeta, EntryKind, FileEntry, FileType, SearchEntry};
pub use error::EntryError;
pub use field::FieldKey;
pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use markdown::{Heading, extract_headings, extract_links};
