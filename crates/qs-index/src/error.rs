//! Error types for the qs-index crate.

use std::path::PathBuf;

use qs_config::ConfigError;
use thiserror::Error;

/// Errors that can occur when loading or filtering the index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The vault root does not exist or is not a directory.
    #[error("vault not found at {path}")]
    VaultNotFound {
        /// Path that was expected to be the vault root.
        path: PathBuf,
    },

    /// No vault is configured.
    #[error("no vault configured; add a [vault] section to .qs.toml or pass --vault")]
    NoVault,

    /// Configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A filter expression could not be parsed.
    #[error("invalid filter '{0}': expected all, markdown, a file type, or .ext")]
    InvalidFilter(String),
}
