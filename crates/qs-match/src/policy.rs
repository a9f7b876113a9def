//! Heading jump policy.
//!
//! Short queries produce many incidental heading matches with low confidence, so the `smart`
//! strategy demands more confidence the longer the query is.

use qs_config::HeadingJumpStrategy;

use crate::{MatchAnalysis, MatchIntent};

/// Returns the confidence a heading match must exceed under the `smart` strategy.
///
/// `query_len` counts chars of the trimmed query.
pub fn smart_threshold(query_len: usize) -> f32 {
    match query_len {
        0..=3 => 0.05,
        4..=6 => 0.08,
        _ => 0.15,
    }
}

/// Decides whether selecting the analysed candidate should jump to its matched heading.
pub fn decide(analysis: &MatchAnalysis, query: &str, strategy: HeadingJumpStrategy) -> bool {
    let is_heading = analysis.intent == MatchIntent::HeadingContent;
    match strategy {
        HeadingJumpStrategy::Never => false,
        HeadingJumpStrategy::Always => is_heading,
        HeadingJumpStrategy::Smart => {
            is_heading && analysis.confidence > smart_threshold(query.trim().chars().count())
        }
    }
}
