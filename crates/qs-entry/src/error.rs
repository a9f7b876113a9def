//! Error types for entry loading.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when reading vault files into entries.
#[derive(Debug, Error)]
pub enum EntryError {
    /// Failed to read a document.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
