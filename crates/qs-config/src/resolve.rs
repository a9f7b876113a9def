//! Vault path resolution.
//!
//! Turns the `path` of a `[vault]` section into an absolute, canonical directory path.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a vault path to an absolute directory.
///
/// `~` and `~/...` expand to the home directory, relative paths are joined onto
/// `config_dir`, absolute paths are used as given. The result is canonicalized and must
/// be an existing directory.
pub fn resolve_vault_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_home(path)?;
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    };

    let canonical = joined
        .canonicalize()
        .map_err(|source| ConfigError::PathResolution {
            path: joined.clone(),
            source,
        })?;

    if canonical.is_dir() {
        Ok(canonical)
    } else {
        Err(ConfigError::VaultNotDirectory { path: canonical })
    }
}

/// Expands a leading `~` to the home directory.
fn expand_home(path: &str) -> Result<PathBuf, ConfigError> {
    match path.strip_prefix('~') {
        Some("") => home_dir(),
        Some(rest) if rest.starts_with('/') => Ok(home_dir()?.join(&rest[1..])),
        _ => Ok(PathBuf::from(path)),
    }
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn relative_paths_join_the_config_dir() {
        let dir = TestDir::new();
        let notes = dir.create_dir("notes");

        for spelling in ["notes", "./notes"] {
            let resolved = resolve_vault_path(spelling, dir.path()).unwrap();
            assert_eq!(resolved, notes.canonicalize().unwrap());
        }
    }

    #[test]
    fn parent_relative_paths_resolve() {
        let dir = TestDir::new();
        let shared = dir.create_dir("shared/vault");
        let project = dir.create_dir("project");

        let resolved = resolve_vault_path("../shared/vault", &project).unwrap();
        assert_eq!(resolved, shared.canonicalize().unwrap());
    }

    #[test]
    fn absolute_paths_ignore_config_dir() {
        let dir = TestDir::new();
        let notes = dir.create_dir("notes").canonicalize().unwrap();

        let resolved = resolve_vault_path(notes.to_str().unwrap(), Path::new("/unused")).unwrap();
        assert_eq!(resolved, notes);
    }

    #[test]
    fn missing_path_is_resolution_error() {
        let dir = TestDir::new();
        let err = resolve_vault_path("./missing", dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::PathResolution { .. }));
    }

    #[test]
    fn file_path_is_not_a_vault() {
        let dir = TestDir::new();
        dir.create_file("note.md");

        let err = resolve_vault_path("note.md", dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::VaultNotDirectory { .. }));
    }

    #[test]
    fn home_expansion() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(expand_home("~").unwrap(), home);
        assert_eq!(expand_home("~/vault/notes").unwrap(), home.join("vault/notes"));
        assert_eq!(expand_home("~other").unwrap(), PathBuf::from("~other"));
        assert_eq!(expand_home("/abs").unwrap(), PathBuf::from("/abs"));
    }
}
