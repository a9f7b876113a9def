//! Configuration file discovery.
//!
//! Finds `.qs.toml` files in the working directory and its ancestors, then appends the
//! global `~/.qs.toml` when discovery was not stopped by a `root = true` file.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".qs.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.qs.toml`) last.
/// A config with `root = true` is included and ends the walk; the global config is then
/// skipped as well.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stops_here = is_root_config(&candidate);
        configs.push(candidate);
        if stops_here {
            return configs;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !configs.contains(&global)
    {
        configs.push(global);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.qs.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::TestDir;

    /// Drops the global config (if the test machine has one) from a discovery result.
    fn local_only(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn nothing_found_in_empty_tree() {
        let dir = TestDir::new();
        let deep = dir.create_dir("vault/notes/daily");

        assert!(local_only(&discover_config_files(&deep)).is_empty());
    }

    #[test]
    fn closest_config_comes_first() {
        let dir = TestDir::new();
        let outer = dir.create_config_at_root();
        let inner = dir.create_config("vault");
        let cwd = dir.create_dir("vault/notes");

        let configs = discover_config_files(&cwd);
        assert_eq!(local_only(&configs), vec![&inner, &outer]);
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let dir = TestDir::new();
        fs::create_dir_all(dir.path().join(CONFIG_FILENAME)).unwrap();
        let cwd = dir.create_dir("vault");

        assert!(local_only(&discover_config_files(&cwd)).is_empty());
    }

    #[test]
    fn root_config_stops_the_walk() {
        let dir = TestDir::new();
        dir.create_config_at_root();
        let root = dir.create_root_config("vault");
        let child = dir.create_config("vault/projects");
        let cwd = dir.create_dir("vault/projects/alpha");

        // Neither the outer config nor the global config are consulted
        assert_eq!(discover_config_files(&cwd), vec![child, root]);
    }

    #[test]
    fn root_false_keeps_walking() {
        let dir = TestDir::new();
        let outer = dir.create_config_at_root();
        let inner = dir.create_config_with_content("vault", "root = false\n");

        let configs = discover_config_files(&dir.path().join("vault"));
        assert_eq!(local_only(&configs), vec![&inner, &outer]);
    }

    #[test]
    fn global_path_uses_config_filename() {
        let path = global_config_path().expect("home directory should resolve");
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.qs.toml")));
    }
}
