//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use qs_config::Config;
use qs_index::{EntryFilter, IndexError, Switcher, VaultSource};
use qs_match::TracingObserver;
use tracing::debug;

use crate::cli::args::VaultArgs;

/// Number of top candidates the match observer logs per query.
const OBSERVED_CANDIDATES: usize = 5;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Returns the configuration with command-line overrides applied.
    pub fn effective_config(&self, args: &VaultArgs) -> Config {
        let mut config = self.config.clone();
        if let Some(limit) = args.limit {
            config.settings.max_results = limit;
        }
        config
    }

    /// Loads the vault into a switcher, applying any filter override.
    pub fn switcher(&self, args: &VaultArgs) -> Result<Switcher, ExitCode> {
        let config = self.effective_config(args);
        let source = self.vault_source(args).map_err(|e| {
            eprintln!("error: {e}");
            if matches!(e, IndexError::NoVault) {
                eprintln!("Run 'qs init' to create a configuration file, then set [vault] path.");
            }
            ExitCode::FAILURE
        })?;

        let mut switcher = Switcher::from_config(&config)
            .with_observer(Arc::new(TracingObserver::new(OBSERVED_CANDIDATES)));
        switcher.load(&source).map_err(|e| {
            eprintln!("error: failed to load vault: {e}");
            ExitCode::FAILURE
        })?;

        if let Some(expr) = &args.filter {
            let filter = EntryFilter::parse(expr, &config.filter.additional_extensions)
                .map_err(|e| {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                })?;
            switcher.apply_filter(filter);
        }

        debug!(
            root = %source.root().display(),
            entries = switcher.updater().catalog().len(),
            searchable = switcher.updater().active_len(),
            "vault loaded"
        );
        Ok(switcher)
    }

    /// Resolves the vault to enumerate: `--vault` first, then the configured vault.
    fn vault_source(&self, args: &VaultArgs) -> Result<VaultSource, IndexError> {
        if let Some(path) = &args.vault {
            let root = if path.is_absolute() {
                path.clone()
            } else {
                self.cwd.join(path)
            };
            let excludes = self.config.compile_excludes()?;
            return VaultSource::new(root, excludes);
        }
        match &self.config.vault {
            Some(vault) => VaultSource::from_vault(vault),
            None => Err(IndexError::NoVault),
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
