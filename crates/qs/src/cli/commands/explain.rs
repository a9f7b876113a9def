//! Implementation of `qs explain`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use qs_match::{RelevanceRanker, smart_threshold};

use crate::cli::{
    args::ExplainCommand,
    context::CommandContext,
    output::{dim, header, selection_line, subheader},
};

/// Prints the ranking factors and classification of every suggestion.
pub fn run(ctx: &CommandContext, cmd: &ExplainCommand) -> ExitCode {
    let query = cmd.query();
    let switcher = match ctx.switcher(&cmd.vault) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let settings = switcher.settings();

    println!("{}", header(&format!("Query: {query}")));
    println!();

    println!("{}", subheader("Index:"));
    let updater = switcher.updater();
    println!(
        "   {} entries, {} searchable (filter: {})",
        updater.catalog().len(),
        updater.active_len(),
        updater.filter()
    );
    println!();

    println!("{}", subheader("Weights:"));
    print_weights(switcher.ranker());
    println!();

    println!("{}", subheader("Heading jumps:"));
    println!(
        "   strategy = {}, auto_jump = {}, smart threshold = {}",
        settings.heading_jump_strategy,
        settings.auto_jump_to_heading,
        smart_threshold(query.trim().chars().count())
    );
    println!();

    let ranked = switcher.suggestions(&query);
    println!("{}", subheader(&format!("Suggestions ({}):", ranked.len())));
    if ranked.is_empty() {
        println!("   {}", dim("(none)"));
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "#", "Path", "Field", "Priority", "Ratio", "Position", "Spans", "Score", "Intent",
        "Confidence", "Jump",
    ]);
    for (i, candidate) in ranked.iter().enumerate() {
        let analysis = switcher.classify_selection(&candidate.candidate, &query);
        let f = &candidate.factors;
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&candidate.entry().path),
            Cell::new(f.best_field.map(|field| field.to_string()).unwrap_or_default()),
            Cell::new(format!("{:.2}", f.priority)),
            Cell::new(format!("{:.2}", f.ratio)),
            Cell::new(format!("{:.2}", f.position)),
            Cell::new(f.match_count),
            Cell::new(format!("{:.3}", candidate.rank_score)),
            Cell::new(analysis.intent),
            Cell::new(format!("{:.3}", analysis.confidence)),
            Cell::new(if analysis.jump_to_heading { "yes" } else { "" }),
        ]);
    }
    println!("{table}");
    println!();

    let top = &ranked[0];
    println!(
        "{} {}",
        subheader("Selecting #1:"),
        selection_line(&switcher.select(&top.candidate, &query))
    );

    ExitCode::SUCCESS
}

/// Prints the field priorities and factor multipliers.
fn print_weights(ranker: &RelevanceRanker) {
    let w = ranker.weights();
    println!(
        "   fields:  basename {} | aliases {} | headings {} | title {}",
        w.basename, w.aliases, w.headings, w.title
    );
    println!(
        "   factors: priority {} | ratio {} | position {} | match_count {}",
        w.priority, w.ratio, w.position, w.match_count
    );
}

