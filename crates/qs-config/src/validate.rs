//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that load fine
//! but are unlikely to do what the user wants.

use std::fmt;

use crate::{Config, FieldWeights};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// A field weight is negative.
    NegativeWeight {
        /// Name of the weight.
        name: &'static str,
        /// Configured value.
        value: f32,
    },
    /// Field priorities no longer rank file matches above content matches.
    FieldOrdering {
        /// The field expected to rank higher.
        higher: &'static str,
        /// The field expected to rank lower.
        lower: &'static str,
    },
    /// `max_results` is zero, so every query returns nothing.
    ZeroMaxResults,
    /// The vault directory no longer exists.
    VaultMissing {
        /// The configured vault path.
        path: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeWeight { name, value } => {
                write!(f, "weight '{name}' is negative ({value})")
            }
            Self::FieldOrdering { higher, lower } => {
                write!(
                    f,
                    "weight '{lower}' is above '{higher}'; {higher} matches should rank first"
                )
            }
            Self::ZeroMaxResults => write!(f, "max_results is 0; no suggestions will be shown"),
            Self::VaultMissing { path } => write!(f, "vault path does not exist: {path}"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = validate_weights(&config.weights);

    if config.settings.max_results == 0 {
        warnings.push(ConfigWarning::ZeroMaxResults);
    }

    if let Some(vault) = &config.vault
        && !vault.path.is_dir()
    {
        warnings.push(ConfigWarning::VaultMissing {
            path: vault.path.display().to_string(),
        });
    }

    warnings
}

/// Checks weight signs and the basename/alias > headings > title ordering.
fn validate_weights(weights: &FieldWeights) -> Vec<ConfigWarning> {
    let named = [
        ("basename", weights.basename),
        ("aliases", weights.aliases),
        ("headings", weights.headings),
        ("title", weights.title),
        ("priority", weights.priority),
        ("ratio", weights.ratio),
        ("position", weights.position),
        ("match_count", weights.match_count),
    ];
    let mut warnings: Vec<ConfigWarning> = named
        .into_iter()
        .filter(|(_, value)| *value < 0.0)
        .map(|(name, value)| ConfigWarning::NegativeWeight { name, value })
        .collect();

    let ordering = [
        ("basename", weights.basename, "headings", weights.headings),
        ("aliases", weights.aliases, "headings", weights.headings),
        ("headings", weights.headings, "title", weights.title),
    ];
    for (higher, high, lower, low) in ordering {
        if low > high {
            warnings.push(ConfigWarning::FieldOrdering { higher, lower });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::Vault;

    #[test]
    fn default_config_is_clean() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn title_above_headings_warns() {
        let mut config = Config::default();
        config.weights.title = 0.9;

        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![ConfigWarning::FieldOrdering {
                higher: "headings",
                lower: "title",
            }]
        );
    }

    #[test]
    fn headings_above_files_warns_twice() {
        let mut config = Config::default();
        config.weights.headings = 2.0;

        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| matches!(
            w,
            ConfigWarning::FieldOrdering {
                lower: "headings",
                ..
            }
        )));
    }

    #[test]
    fn negative_weight_warns() {
        let mut config = Config::default();
        config.weights.match_count = -0.1;

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::NegativeWeight {
            name: "match_count",
            value: -0.1,
        }));
    }

    #[test]
    fn zero_results_and_missing_vault() {
        let mut config = Config::default();
        config.settings.max_results = 0;
        config.vault = Some(Vault {
            path: PathBuf::from("/definitely/not/a/vault"),
            exclude: vec![],
        });

        let warnings = validate_config(&config);
        assert!(warnings.contains(&ConfigWarning::ZeroMaxResults));
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::VaultMissing { .. }))
        );
    }

    #[test]
    fn warnings_display() {
        let warning = ConfigWarning::FieldOrdering {
            higher: "headings",
            lower: "title",
        };
        assert_eq!(
            warning.to_string(),
            "weight 'title' is above 'headings'; headings matches should rank first"
        );
    }
}
