//! Vault exclude pattern compilation and matching.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::ConfigError;

/// Compiled exclude globs for vault enumeration.
///
/// Paths are matched relative to the vault root.
#[derive(Debug, Clone)]
pub struct ExcludePatterns {
    /// The compiled glob set.
    set: GlobSet,
    /// Number of patterns in the set.
    len: usize,
}

impl ExcludePatterns {
    /// Compiles a list of glob patterns.
    pub fn compile(patterns: &[String]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| ConfigError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })?;
        Ok(Self {
            set,
            len: patterns.len(),
        })
    }

    /// Returns a matcher that excludes nothing.
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
            len: 0,
        }
    }

    /// Returns true when `rel_path` matches any exclude pattern.
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        self.len > 0 && self.set.is_match(rel_path)
    }

    /// Returns true when no patterns were compiled.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(patterns: &[&str]) -> ExcludePatterns {
        let owned: Vec<String> = patterns.iter().map(|p| (*p).to_string()).collect();
        ExcludePatterns::compile(&owned).unwrap()
    }

    #[test]
    fn matches_nested_directories() {
        let excludes = compile(&["**/.trash/**", "templates/*.md"]);

        assert!(excludes.is_excluded(Path::new(".trash/old.md")));
        assert!(excludes.is_excluded(Path::new("a/b/.trash/old.md")));
        assert!(excludes.is_excluded(Path::new("templates/daily.md")));
        assert!(!excludes.is_excluded(Path::new("notes/templates.md")));
    }

    #[test]
    fn empty_excludes_nothing() {
        let excludes = ExcludePatterns::empty();
        assert!(excludes.is_empty());
        assert!(!excludes.is_excluded(Path::new("anything.md")));
    }

    #[test]
    fn invalid_pattern_reports_pattern() {
        let err = ExcludePatterns::compile(&["a[".to_string()]).unwrap_err();
        match err {
            ConfigError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "a["),
            other => panic!("unexpected error: {other}"),
        }
    }
}
