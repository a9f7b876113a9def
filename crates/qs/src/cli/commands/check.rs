//! Implementation of `qs check`.

use std::process::ExitCode;

use qs_config::{ConfigWarning, discover_config_files};
use qs_index::VaultSource;

use crate::cli::{
    context::CommandContext,
    output::{dim, error, subheader, success, warning},
};

/// Exit codes for `qs check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and reports vault status.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found.");
        println!();
        println!("Run 'qs init' to create a configuration file.");
        return exit_codes::OK;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("  {}", path.display());
    }
    println!();

    let config = &ctx.config;

    println!("{}", subheader("Vault:"));
    match &config.vault {
        None => println!("  {}", dim("(none defined)")),
        Some(vault) => match VaultSource::from_vault(vault) {
            Ok(source) => {
                let scan = source.scan();
                println!(
                    "  {} {} {} files, {} unresolved link targets",
                    vault.path.display(),
                    success("[ok]"),
                    scan.entries.len(),
                    scan.unresolved().len()
                );
                for (path, reason) in &scan.skipped {
                    println!("  {} {}: {reason}", warning("skipped"), path.display());
                }
            }
            Err(e) => println!("  {} {} {e}", vault.path.display(), error("[error]")),
        },
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return exit_codes::OK;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("  - {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|w| match w {
            ConfigWarning::NegativeWeight { .. } => "Weights should be zero or positive.",
            ConfigWarning::FieldOrdering { .. } => {
                "Keep [weights] basename and aliases above headings, and headings above title."
            }
            ConfigWarning::ZeroMaxResults => "Set [settings] max_results to at least 1.",
            ConfigWarning::VaultMissing { .. } => {
                "Create the vault directory or update [vault] path."
            }
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
