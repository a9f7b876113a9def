//! Incremental entry index for qs.
//!
//! This crate keeps a live [`EntryCatalog`](qs_entry::EntryCatalog) and a match engine in step
//! and exposes the quick-switcher operations on top of them. It handles:
//! - Vault enumeration into entries, with unresolved link targets
//! - Applying create, delete, rename and link-resolution notifications
//! - Re-indexing the engine once per mutation batch
//! - Narrowing the searchable subset with filters
//! - The [`Switcher`] facade: suggestions, classification and selection targets
//!
//! # Example
//!
//! ```no_run
//! use qs_config::{Config, ExcludePatterns};
//! use qs_index::{Switcher, VaultSource};
//!
//! let config = Config::default();
//! let mut switcher = Switcher::from_config(&config);
//! let source = VaultSource::new("./notes", ExcludePatterns::empty()).unwrap();
//! switcher.load(&source).unwrap();
//!
//! for candidate in switcher.suggestions("plan") {
//!     println!("{} {:.3}", candidate.entry().path, candidate.rank_score);
//! }
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod filter;
mod links;
mod switcher;
#[cfg(test)]
mod test_support;
mod updater;

pub use discovery::{EntrySource, VaultScan, VaultSource};
pub use error::IndexError;
pub use filter::EntryFilter;
pub use links::LinkResolver;
pub use switcher::{Selection, Switcher};
pub use updater::{IncrementalIndexUpdater, IndexEvent};
