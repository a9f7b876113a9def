//! Configuration file parsing.
//!
//! Parses individual `.qs.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{StringWithSeparator, formats::CommaSeparator, serde_as};

use crate::{ConfigError, HeadingJumpStrategy};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// General settings section.
    pub settings: Option<RawSettings>,
    /// Ranking weights section.
    pub weights: Option<RawWeights>,
    /// Filter section.
    pub filter: Option<RawFilterSettings>,
    /// Vault section.
    pub vault: Option<RawVault>,
}

/// Raw general settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    /// Maximum suggestions per query.
    pub max_results: Option<usize>,
    /// Whether heading matches may jump at all.
    pub auto_jump_to_heading: Option<bool>,
    /// Heading jump strategy.
    pub heading_jump_strategy: Option<HeadingJumpStrategy>,
    /// Whether unresolved link targets are searchable.
    pub include_unresolved: Option<bool>,
}

/// Raw ranking weights.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawWeights {
    /// Basename field priority.
    pub basename: Option<f32>,
    /// Alias field priority.
    #[serde(alias = "alias")]
    pub aliases: Option<f32>,
    /// Heading field priority.
    pub headings: Option<f32>,
    /// Title field priority.
    pub title: Option<f32>,
    /// Field priority factor multiplier.
    pub priority: Option<f32>,
    /// Match ratio factor multiplier.
    pub ratio: Option<f32>,
    /// Match position factor multiplier.
    pub position: Option<f32>,
    /// Match count factor multiplier.
    pub match_count: Option<f32>,
}

/// Raw filter settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFilterSettings {
    /// Restrict searching to documents plus additional extensions.
    pub markdown_only: Option<bool>,
    /// Comma-separated list of extensions kept in markdown-only mode.
    #[serde_as(as = "Option<StringWithSeparator::<CommaSeparator, String>>")]
    pub additional_extensions: Option<Vec<String>>,
}

/// Raw vault definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVault {
    /// Path to the vault directory.
    pub path: String,
    /// Exclude patterns (optional, defaults to none).
    pub exclude: Option<Vec<String>>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
