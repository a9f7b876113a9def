//! Implementation of `qs search`.

use std::process::ExitCode;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{JsonSearchOutput, JsonSuggestion, dim, print_json, selection_line, suggestion_line},
};

/// Prints ranked suggestions for the query.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let query = cmd.query();
    let switcher = match ctx.switcher(&cmd.vault) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let ranked = switcher.suggestions(&query);
    let create = switcher.creation_target(&query).map(|e| e.path);

    if cmd.json {
        let suggestions = ranked
            .iter()
            .map(|c| JsonSuggestion {
                path: &c.entry().path,
                name: &c.entry().name,
                rank_score: c.rank_score,
                factors: &c.factors,
                spans: &c.candidate.spans,
                analysis: switcher.classify_selection(&c.candidate, &query),
                selection: switcher.select(&c.candidate, &query),
            })
            .collect();
        return print_json(&JsonSearchOutput {
            query: &query,
            suggestions,
            create,
        });
    }

    if ranked.is_empty() {
        println!("{}", dim("No matches."));
    }
    for (i, candidate) in ranked.iter().enumerate() {
        let analysis = switcher.classify_selection(&candidate.candidate, &query);
        println!("{}", suggestion_line(i + 1, candidate, &analysis));
    }

    if let Some(top) = ranked.first() {
        let selection = switcher.select(&top.candidate, &query);
        println!();
        println!("{} {}", dim("enter:"), selection_line(&selection));
    }
    if let Some(path) = create {
        if ranked.is_empty() {
            println!();
        }
        println!("{} create {path}", dim("new:"));
    }

    ExitCode::SUCCESS
}
