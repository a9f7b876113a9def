//! Configuration system for qs.
//!
//! qs uses TOML configuration files named `.qs.toml`. Configuration is resolved by walking up
//! the directory tree from the current working directory, collecting any `.qs.toml` files found,
//! then loading `~/.qs.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod resolve;
mod strategy;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs, normalize_extension};
pub use parse::{
    RawConfig, RawFilterSettings, RawSettings, RawVault, RawWeights, parse_config_file,
    parse_config_str,
};
pub use patterns::ExcludePatterns;
pub use resolve::resolve_vault_path;
use serde::{Deserialize, Serialize};
use serde_with::{StringWithSeparator, formats::CommaSeparator, serde_as};
pub use strategy::HeadingJumpStrategy;
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for qs.
///
/// This represents the fully resolved configuration after merging all discovered `.qs.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// General switcher settings.
    pub settings: Settings,
    /// Ranking weights.
    pub weights: FieldWeights,
    /// Searchable-subset filter settings.
    pub filter: FilterSettings,
    /// The vault to enumerate, if one is configured.
    pub vault: Option<Vault>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.qs.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.qs.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.qs.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Compiles the vault exclude patterns.
    ///
    /// Returns an empty matcher when no vault is configured.
    pub fn compile_excludes(&self) -> Result<ExcludePatterns, ConfigError> {
        match &self.vault {
            Some(vault) => ExcludePatterns::compile(&vault.exclude),
            None => Ok(ExcludePatterns::empty()),
        }
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Field weights that break the basename/alias > headings > title ordering
    /// - Negative weights
    /// - A `max_results` of zero
    /// - A vault path that no longer exists
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.qs.toml` file. The vault section is omitted
    /// since its path is resolved.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            settings: self.settings.clone(),
            weights: self.weights.clone(),
            filter: self.filter.clone(),
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// General switcher settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum suggestions returned per query.
    pub max_results: usize,
    /// Whether selecting a heading match may jump to the heading at all.
    pub auto_jump_to_heading: bool,
    /// Strategy deciding when a heading match jumps.
    pub heading_jump_strategy: HeadingJumpStrategy,
    /// Whether unresolved link targets are searchable.
    pub include_unresolved: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_results: 50,
            auto_jump_to_heading: true,
            heading_jump_strategy: HeadingJumpStrategy::Smart,
            include_unresolved: true,
        }
    }
}

/// Weights used by the relevance ranker.
///
/// The first four map a matched field to its priority. The last four scale each
/// ranking factor before they are summed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldWeights {
    /// Priority of a basename match.
    pub basename: f32,
    /// Priority of an alias match.
    pub aliases: f32,
    /// Priority of a heading match.
    pub headings: f32,
    /// Priority of a title match.
    pub title: f32,
    /// Multiplier for the field priority factor.
    pub priority: f32,
    /// Multiplier for the match ratio factor.
    pub ratio: f32,
    /// Multiplier for the match position factor.
    pub position: f32,
    /// Multiplier for the match count factor.
    pub match_count: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            basename: 1.0,
            aliases: 1.0,
            headings: 0.6,
            title: 0.4,
            priority: 1.0,
            ratio: 0.5,
            position: 0.3,
            match_count: 0.05,
        }
    }
}

/// Settings narrowing which entries are searchable.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Restrict the searchable set to documents plus `additional_extensions`.
    pub markdown_only: bool,
    /// Extensions (without the dot) kept in markdown-only mode.
    #[serde_as(as = "StringWithSeparator::<CommaSeparator, String>")]
    pub additional_extensions: Vec<String>,
}

/// The vault whose files are enumerated into the catalog.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Resolved absolute path to the vault directory.
    pub path: PathBuf,
    /// Exclude patterns, relative to the vault root.
    pub exclude: Vec<String>,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// General settings.
    settings: Settings,
    /// Ranking weights.
    weights: FieldWeights,
    /// Filter settings.
    filter: FilterSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_results, 50);
        assert!(settings.auto_jump_to_heading);
        assert_eq!(settings.heading_jump_strategy, HeadingJumpStrategy::Smart);
        assert!(settings.include_unresolved);
    }

    #[test]
    fn test_weight_defaults_keep_field_ordering() {
        let weights = FieldWeights::default();
        assert!((weights.basename - weights.aliases).abs() < f32::EPSILON);
        assert!(weights.aliases > weights.headings);
        assert!(weights.headings > weights.title);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.vault.is_none());
        assert!(config.config_root.is_none());
        assert!(!config.filter.markdown_only);
        assert!(config.filter.additional_extensions.is_empty());
    }

    #[test]
    fn test_settings_to_toml() {
        let mut config = Config::default();
        config.filter.additional_extensions = vec!["pdf".into(), "canvas".into()];
        let toml = config.settings_to_toml();

        assert!(toml.contains("[settings]"));
        assert!(toml.contains("[weights]"));
        assert!(toml.contains("[filter]"));
        assert!(toml.contains("max_results = 50"));
        assert!(toml.contains("heading_jump_strategy = \"smart\""));
        assert!(toml.contains("additional_extensions = \"pdf,canvas\""));

        // The output must parse back through the regular config parser
        let parsed = parse_config_str(&toml, Path::new("roundtrip.toml"))
            .expect("settings_to_toml should produce a valid config");
        let filter = parsed.filter.unwrap();
        assert_eq!(
            filter.additional_extensions,
            Some(vec!["pdf".to_string(), "canvas".to_string()])
        );
    }
}
