//! Match-intent classification.
//!
//! Decides what selecting a candidate means. The rules form a cascade where the first rule that
//! applies wins:
//!
//! 1. the basename equals the query: [`MatchIntent::ExactFile`], confidence 1.0
//! 2. an alias matched: [`MatchIntent::FileAlias`], 1.0 for an exact alias, else its confidence
//! 3. the basename matched partially: [`MatchIntent::FilePartial`]
//! 4. the title matched with confidence above [`TITLE_ACCEPTANCE`]: [`MatchIntent::TitleMatch`]
//! 5. a heading matched: [`MatchIntent::HeadingContent`], recording the heading
//! 6. otherwise [`MatchIntent::FilePartial`] with [`FALLBACK_CONFIDENCE`]
//!
//! Comparisons use the trimmed, lowercased query. Spans whose value is not actually carried by
//! the entry are ignored.

use std::{fmt, sync::Arc};

use qs_entry::{FieldKey, SearchEntry};
use serde::Serialize;

use crate::{MatchObserver, MatchSpan, NoopObserver, RawCandidate, confidence};

/// Minimum confidence for a title span to classify as [`MatchIntent::TitleMatch`].
pub const TITLE_ACCEPTANCE: f32 = 0.6;

/// Confidence reported when no field could be classified.
pub const FALLBACK_CONFIDENCE: f32 = 0.3;

/// What the user most likely means by selecting a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchIntent {
    /// The query names the file exactly.
    ExactFile,
    /// The query names one of the file's aliases.
    FileAlias,
    /// The query is part of the file name, or nothing better applies.
    FilePartial,
    /// The query names the document title.
    TitleMatch,
    /// The query names a section of the document.
    HeadingContent,
}

impl MatchIntent {
    /// Returns the kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExactFile => "exact-file",
            Self::FileAlias => "file-alias",
            Self::FilePartial => "file-partial",
            Self::TitleMatch => "title-match",
            Self::HeadingContent => "heading-content",
        }
    }
}

impl fmt::Display for MatchIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which text to show for a classified candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "show", content = "text", rename_all = "snake_case")]
pub enum DisplayInfo {
    /// Show the matched heading.
    Heading(String),
    /// Show the matched alias.
    Alias(String),
    /// Show the document title.
    Title(String),
    /// Show the plain entry name.
    Name(String),
}

impl DisplayInfo {
    /// Returns the literal text to display.
    pub fn text(&self) -> &str {
        match self {
            Self::Heading(t) | Self::Alias(t) | Self::Title(t) | Self::Name(t) => t,
        }
    }
}

/// The classification of one candidate for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchAnalysis {
    /// Classified intent.
    pub intent: MatchIntent,
    /// Strength of the evidence, in `[0, 1]`.
    pub confidence: f32,
    /// Whether selecting should navigate to `heading`; set by the heading jump policy.
    pub jump_to_heading: bool,
    /// The matched heading for [`MatchIntent::HeadingContent`].
    pub heading: Option<String>,
    /// What to display.
    pub display: DisplayInfo,
}

impl MatchAnalysis {
    /// Creates an analysis that does not jump.
    fn new(intent: MatchIntent, confidence: f32, display: DisplayInfo) -> Self {
        Self {
            intent,
            confidence,
            jump_to_heading: false,
            heading: None,
            display,
        }
    }
}

/// Classifies candidates with the intent cascade.
#[derive(Clone)]
pub struct MatchIntentClassifier {
    /// Receives every classification.
    observer: Arc<dyn MatchObserver>,
}

impl Default for MatchIntentClassifier {
    fn default() -> Self {
        Self {
            observer: Arc::new(NoopObserver),
        }
    }
}

impl MatchIntentClassifier {
    /// Creates a classifier without an observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an observer.
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Classifies `candidate` for `query`.
    pub fn classify(&self, candidate: &RawCandidate<'_>, query: &str) -> MatchAnalysis {
        let analysis = Self::cascade(candidate, query);
        self.observer.on_classified(query, candidate.entry, &analysis);
        analysis
    }

    /// Runs the cascade without notifying the observer.
    fn cascade(candidate: &RawCandidate<'_>, query: &str) -> MatchAnalysis {
        let needle = query.trim().to_lowercase();
        let entry = candidate.entry;
        let name = || DisplayInfo::Name(entry.name.clone());

        if !needle.is_empty() && entry.basename.trim().to_lowercase() == needle {
            return MatchAnalysis::new(MatchIntent::ExactFile, 1.0, name());
        }

        let alias_spans: Vec<&MatchSpan> = valid_spans(candidate, FieldKey::Aliases).collect();
        if let Some(exact) = alias_spans
            .iter()
            .find(|s| s.value.trim().to_lowercase() == needle)
        {
            return MatchAnalysis::new(
                MatchIntent::FileAlias,
                1.0,
                DisplayInfo::Alias(exact.value.clone()),
            );
        }
        if let Some((span, score)) = best_by_confidence(alias_spans, query) {
            return MatchAnalysis::new(
                MatchIntent::FileAlias,
                score,
                DisplayInfo::Alias(span.value.clone()),
            );
        }

        if let Some((_, score)) = best_by_confidence(valid_spans(candidate, FieldKey::Basename), query)
        {
            return MatchAnalysis::new(MatchIntent::FilePartial, score, name());
        }

        if let Some((span, score)) = best_by_confidence(valid_spans(candidate, FieldKey::Title), query)
            && score > TITLE_ACCEPTANCE
        {
            return MatchAnalysis::new(
                MatchIntent::TitleMatch,
                score,
                DisplayInfo::Title(span.value.clone()),
            );
        }

        if let Some((span, score)) =
            best_by_confidence(valid_spans(candidate, FieldKey::Headings), query)
        {
            let mut analysis = MatchAnalysis::new(
                MatchIntent::HeadingContent,
                score,
                DisplayInfo::Heading(span.value.clone()),
            );
            analysis.heading = Some(span.value.clone());
            return analysis;
        }

        MatchAnalysis::new(MatchIntent::FilePartial, FALLBACK_CONFIDENCE, name())
    }
}

/// Spans of `field` whose value the entry actually carries.
fn valid_spans<'c>(
    candidate: &'c RawCandidate<'_>,
    field: FieldKey,
) -> impl Iterator<Item = &'c MatchSpan> {
    let entry: &SearchEntry = candidate.entry;
    candidate
        .spans_for(field)
        .filter(move |span| entry.has_field_value(field, &span.value))
}

/// Picks the span with the highest confidence; the first wins ties.
fn best_by_confidence<'s>(
    spans: impl IntoIterator<Item = &'s MatchSpan>,
    query: &str,
) -> Option<(&'s MatchSpan, f32)> {
    spans
        .into_iter()
        .map(|span| (span, confidence(span, query)))
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
}
