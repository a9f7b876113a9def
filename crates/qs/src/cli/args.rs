//! Clap argument definitions for the `qs` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "qs")]
#[command(about = "Quick switcher - ranked fuzzy search over a notes vault")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags selecting the vault and the searchable subset.
#[derive(Args, Debug, Clone, Default)]
pub struct VaultArgs {
    /// Vault directory, overriding the configured vault
    #[arg(long)]
    pub vault: Option<PathBuf>,

    /// Searchable subset: all, markdown, a file type (pdf, image, ...) or .ext
    #[arg(long)]
    pub filter: Option<String>,

    /// Maximum suggestions [default: max_results from config]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for `qs search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Query words, joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    #[command(flatten)]
    /// Vault selection.
    pub vault: VaultArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `qs explain`.
#[derive(Args, Debug, Clone)]
pub struct ExplainCommand {
    /// Query words, joined with spaces
    #[arg(required = true)]
    pub query: Vec<String>,

    #[command(flatten)]
    /// Vault selection.
    pub vault: VaultArgs,
}

/// Arguments for `qs init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.qs.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `qs` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show ranked suggestions for a query
    Search(SearchCommand),

    /// Show the ranking factors and classification behind each suggestion
    Explain(ExplainCommand),

    /// Initialize qs configuration in current directory
    Init(InitCommand),

    /// Validate configuration and diagnose issues
    Check,

    /// Show effective configuration settings
    Config,
}

impl SearchCommand {
    /// Returns the query string.
    pub fn query(&self) -> String {
        self.query.join(" ")
    }
}

impl ExplainCommand {
    /// Returns the query string.
    pub fn query(&self) -> String {
        self.query.join(" ")
    }
}
