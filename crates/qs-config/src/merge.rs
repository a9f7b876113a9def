//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving the vault path.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, FieldWeights, FilterSettings, Settings, Vault,
    parse::{RawConfig, RawFilterSettings, RawSettings, RawWeights},
    resolve::resolve_vault_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings and weights: first defined value wins
/// - Extension lists: first defined list wins as a whole
/// - Vault: first definition wins completely (path and excludes)
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut settings = Settings::default();
    let mut weights = FieldWeights::default();
    let mut filter = FilterSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.settings {
            apply_raw_settings(&mut settings, raw);
        }
        if let Some(raw) = &parsed.config.weights {
            apply_raw_weights(&mut weights, raw);
        }
        if let Some(raw) = &parsed.config.filter {
            apply_raw_filter(&mut filter, raw);
        }
    }

    let vault = merge_vault(configs)?;
    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Ok(Config {
        settings,
        weights,
        filter,
        vault,
        config_root,
    })
}

/// Applies raw settings to result, overwriting any present values.
fn apply_raw_settings(result: &mut Settings, raw: &RawSettings) {
    if let Some(v) = raw.max_results {
        result.max_results = v;
    }
    if let Some(v) = raw.auto_jump_to_heading {
        result.auto_jump_to_heading = v;
    }
    if let Some(v) = raw.heading_jump_strategy {
        result.heading_jump_strategy = v;
    }
    if let Some(v) = raw.include_unresolved {
        result.include_unresolved = v;
    }
}

/// Applies raw weights to result.
fn apply_raw_weights(result: &mut FieldWeights, raw: &RawWeights) {
    let pairs = [
        (&mut result.basename, raw.basename),
        (&mut result.aliases, raw.aliases),
        (&mut result.headings, raw.headings),
        (&mut result.title, raw.title),
        (&mut result.priority, raw.priority),
        (&mut result.ratio, raw.ratio),
        (&mut result.position, raw.position),
        (&mut result.match_count, raw.match_count),
    ];
    for (slot, value) in pairs {
        if let Some(v) = value {
            *slot = v;
        }
    }
}

/// Applies raw filter settings, normalizing extension spelling.
fn apply_raw_filter(result: &mut FilterSettings, raw: &RawFilterSettings) {
    if let Some(v) = raw.markdown_only {
        result.markdown_only = v;
    }
    if let Some(extensions) = &raw.additional_extensions {
        result.additional_extensions = extensions
            .iter()
            .filter_map(|ext| normalize_extension(ext))
            .collect();
    }
}

/// Normalizes a user-supplied extension: trims whitespace and a leading dot, lowercases.
///
/// Returns `None` for entries that are empty after trimming.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim().trim_start_matches('.').trim();
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// Picks the highest-precedence vault definition and resolves its path.
fn merge_vault(configs: &[ParsedConfig]) -> Result<Option<Vault>, ConfigError> {
    let Some((parsed, raw)) = configs
        .iter()
        .find_map(|p| p.config.vault.as_ref().map(|v| (p, v)))
    else {
        return Ok(None);
    };

    let config_dir = parsed.path.parent().unwrap_or_else(|| Path::new("."));
    let path = resolve_vault_path(&raw.path, config_dir)?;

    Ok(Some(Vault {
        path,
        exclude: raw.exclude.clone().unwrap_or_default(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeadingJumpStrategy, parse::parse_config_str, test_support::TestDir};

    fn parsed(path: PathBuf, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path,
            config: parse_config_str(toml, Path::new("test")).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let result = merge_configs(&[]).unwrap();
        assert_eq!(result.settings.max_results, 50);
        assert!(result.vault.is_none());
    }

    #[test]
    fn test_merge_scalar_override() {
        let dir = TestDir::new();
        let high = parsed(
            dir.path().join("vault/.qs.toml"),
            r#"
[settings]
max_results = 10

[weights]
title = 0.2
"#,
        );
        let low = parsed(
            dir.path().join(".qs.toml"),
            r#"
[settings]
max_results = 99
heading_jump_strategy = "never"

[weights]
title = 0.3
headings = 0.5
"#,
        );

        let result = merge_configs(&[high, low]).unwrap();

        assert_eq!(result.settings.max_results, 10);
        // Not overridden by the closer config
        assert_eq!(
            result.settings.heading_jump_strategy,
            HeadingJumpStrategy::Never
        );
        assert!((result.weights.title - 0.2).abs() < f32::EPSILON);
        assert!((result.weights.headings - 0.5).abs() < f32::EPSILON);
        assert!((result.weights.basename - 1.0).abs() < f32::EPSILON);
        assert_eq!(result.config_root, Some(dir.path().join("vault")));
    }

    #[test]
    fn test_merge_normalizes_extensions() {
        let dir = TestDir::new();
        let config = parsed(
            dir.path().join(".qs.toml"),
            "[filter]\nadditional_extensions = \" .PDF, canvas,,\"\n",
        );

        let result = merge_configs(&[config]).unwrap();
        assert_eq!(result.filter.additional_extensions, vec!["pdf", "canvas"]);
    }

    #[test]
    fn test_merge_extension_list_first_wins() {
        let dir = TestDir::new();
        let high = parsed(
            dir.path().join("a/.qs.toml"),
            "[filter]\nadditional_extensions = \"png\"\n",
        );
        let low = parsed(
            dir.path().join(".qs.toml"),
            "[filter]\nmarkdown_only = true\nadditional_extensions = \"pdf,canvas\"\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        assert!(result.filter.markdown_only);
        assert_eq!(result.filter.additional_extensions, vec!["png"]);
    }

    #[test]
    fn test_merge_vault_resolves_relative_path() {
        let dir = TestDir::new();
        let notes = dir.create_dir("notes");
        let config = parsed(
            dir.path().join(".qs.toml"),
            "[vault]\npath = \"./notes\"\nexclude = [\"**/.trash/**\"]\n",
        );

        let result = merge_configs(&[config]).unwrap();
        let vault = result.vault.unwrap();
        assert_eq!(vault.path, notes.canonicalize().unwrap());
        assert_eq!(vault.exclude, vec!["**/.trash/**"]);
    }

    #[test]
    fn test_merge_vault_first_wins() {
        let dir = TestDir::new();
        let near = dir.create_dir("project/notes");
        dir.create_dir("notes");
        let high = parsed(
            dir.path().join("project/.qs.toml"),
            "[vault]\npath = \"./notes\"\n",
        );
        let low = parsed(
            dir.path().join(".qs.toml"),
            "[vault]\npath = \"./notes\"\nexclude = [\"drafts/**\"]\n",
        );

        let result = merge_configs(&[high, low]).unwrap();
        let vault = result.vault.unwrap();
        assert_eq!(vault.path, near.canonicalize().unwrap());
        assert!(vault.exclude.is_empty());
    }

    #[test]
    fn test_merge_missing_vault_is_error() {
        let dir = TestDir::new();
        let config = parsed(
            dir.path().join(".qs.toml"),
            "[vault]\npath = \"./nope\"\n",
        );

        let result = merge_configs(&[config]);
        assert!(matches!(result, Err(ConfigError::PathResolution { .. })));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".Canvas "), Some("canvas".to_string()));
        assert_eq!(normalize_extension("   "), None);
        assert_eq!(normalize_extension("."), None);
    }
}
