//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use qs_entry::{FieldKey, SearchEntry};
pub use qs_highlight::{dim, error, header, subheader, success, warning};
use qs_highlight::highlight_matches;
use qs_index::Selection;
use qs_match::{DisplayInfo, MatchAnalysis, MatchSpan, RankFactors, RankedCandidate};
use serde::Serialize;

/// JSON output for one suggestion.
#[derive(Serialize)]
pub struct JsonSuggestion<'a> {
    /// Vault-relative path.
    pub path: &'a str,
    /// File name with extension.
    pub name: &'a str,
    /// Aggregate rank score.
    pub rank_score: f32,
    /// Unweighted ranking factors.
    pub factors: &'a RankFactors,
    /// Per-field matches.
    pub spans: &'a [MatchSpan],
    /// Intent classification.
    pub analysis: MatchAnalysis,
    /// What selecting the suggestion does.
    pub selection: Selection,
}

/// JSON output for `qs search`.
#[derive(Serialize)]
pub struct JsonSearchOutput<'a> {
    /// The query as searched.
    pub query: &'a str,
    /// Suggestions, best first.
    pub suggestions: Vec<JsonSuggestion<'a>>,
    /// Path a new note for the query would get, if no entry has that name.
    pub create: Option<String>,
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Renders one suggestion line: rank, highlighted name, matched detail and location.
pub fn suggestion_line(rank: usize, candidate: &RankedCandidate<'_>, analysis: &MatchAnalysis) -> String {
    let entry = candidate.entry();
    let spans = &candidate.candidate.spans;

    let name_ranges: Vec<_> = spans
        .iter()
        .filter(|s| s.field == FieldKey::Basename)
        .flat_map(|s| s.ranges.iter().cloned())
        .collect();
    let mut line = format!("{rank:>3}. {}", highlight_matches(&entry.name, &name_ranges));

    if let Some(detail) = detail(&analysis.display, spans) {
        line.push_str("  ");
        line.push_str(&detail);
    }
    if let Some(location) = location(entry) {
        line.push_str("  ");
        line.push_str(&dim(&location));
    }
    line.push_str("  ");
    line.push_str(&dim(&format!("[{}]", analysis.intent)));
    line
}

/// Describes what selecting a suggestion does.
pub fn selection_line(selection: &Selection) -> String {
    match selection {
        Selection::OpenFile { path } => format!("open {path}"),
        Selection::OpenHeading { path, heading } => format!("open {path} at heading \"{heading}\""),
        Selection::OpenUrl { url } => format!("open {url}"),
        Selection::CreateFile { path } => format!("create {path}"),
    }
}

/// Renders the matched alias, title or heading, when the display is not the plain name.
fn detail(display: &DisplayInfo, spans: &[MatchSpan]) -> Option<String> {
    let (field, prefix) = match display {
        DisplayInfo::Name(_) => return None,
        DisplayInfo::Alias(_) => (FieldKey::Aliases, "alias: "),
        DisplayInfo::Title(_) => (FieldKey::Title, "title: "),
        DisplayInfo::Heading(_) => (FieldKey::Headings, "# "),
    };
    let text = display.text();
    let ranges = spans
        .iter()
        .find(|s| s.field == field && s.value == text)
        .map(|s| s.ranges.as_slice())
        .unwrap_or_default();
    Some(format!("{}{}", dim(prefix), highlight_matches(text, ranges)))
}

/// Returns where an entry lives, when that adds to its name.
fn location(entry: &SearchEntry) -> Option<String> {
    if let Some(url) = entry.url() {
        return Some(url.to_string());
    }
    if entry.is_unresolved() {
        return Some(format!("{} (unresolved)", entry.path));
    }
    (entry.path != entry.name).then(|| entry.path.clone())
}
