//! Implementation of `qs config`.

use std::process::ExitCode;

use qs_highlight::Highlighter;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader},
};

/// Shows the config files in effect and the merged settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    match &config.config_root {
        Some(root) => println!("{} {}", dim("# nearest config in"), dim(&root.display().to_string())),
        None => println!("{}", dim("# no configuration files found; showing defaults")),
    }
    if let Some(vault) = &config.vault {
        println!("{} {}", subheader("# vault:"), vault.path.display());
    }

    let highlighter = Highlighter::new();
    print!("{}", highlighter.highlight_toml(&config.settings_to_toml()));
    ExitCode::SUCCESS
}
