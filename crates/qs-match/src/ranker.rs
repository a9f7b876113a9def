//! Multi-factor re-ranking of engine candidates.
//!
//! The engine's single score does not know that a basename hit matters more than a hit buried
//! in a heading. The ranker scores each candidate on four factors and orders by their weighted
//! sum:
//!
//! - **priority**: the highest configured field weight among the candidate's spans
//! - **ratio**: matched chars over field length, for the best span
//! - **position**: `1 - start / field_len`, for the best span
//! - **match count**: the number of spans across all fields
//!
//! The best span is the one with the highest field weight, then the highest ratio, then the
//! earliest start. Sorting is stable, so equal scores keep the engine's order.

use std::{cmp::Ordering, sync::Arc};

use qs_config::FieldWeights;
use qs_entry::FieldKey;

use crate::{MatchObserver, MatchSpan, NoopObserver, RankFactors, RankedCandidate, RawCandidate};

/// Orders raw candidates by the weighted factor sum.
#[derive(Clone)]
pub struct RelevanceRanker {
    /// Field weights and factor multipliers.
    weights: FieldWeights,
    /// Receives the ranked list.
    observer: Arc<dyn MatchObserver>,
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self::new(FieldWeights::default())
    }
}

impl RelevanceRanker {
    /// Creates a ranker with the given weights and no observer.
    pub fn new(weights: FieldWeights) -> Self {
        Self {
            weights,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Attaches an observer.
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Returns the configured weights.
    pub fn weights(&self) -> &FieldWeights {
        &self.weights
    }

    /// Returns the weight of one field.
    pub fn field_weight(&self, field: FieldKey) -> f32 {
        match field {
            FieldKey::Basename => self.weights.basename,
            FieldKey::Aliases => self.weights.aliases,
            FieldKey::Title => self.weights.title,
            FieldKey::Headings => self.weights.headings,
        }
    }

    /// Ranks candidates for `query`, best first.
    ///
    /// A blank query yields no candidates.
    pub fn rank<'a>(&self, candidates: Vec<RawCandidate<'a>>, query: &str) -> Vec<RankedCandidate<'a>> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<RankedCandidate<'a>> = candidates
            .into_iter()
            .map(|candidate| {
                let factors = self.factors(&candidate);
                RankedCandidate {
                    rank_score: self.aggregate(&factors),
                    factors,
                    candidate,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.rank_score.total_cmp(&a.rank_score));
        self.observer.on_ranked(query, &ranked);
        ranked
    }

    /// Computes the unweighted factors of one candidate.
    pub fn factors(&self, candidate: &RawCandidate<'_>) -> RankFactors {
        let Some(best) = candidate
            .spans
            .iter()
            .map(|span| self.span_factors(span))
            .reduce(|best, next| if next.beats(&best) { next } else { best })
        else {
            return RankFactors::default();
        };

        RankFactors {
            priority: best.priority,
            ratio: best.ratio,
            position: best.position,
            match_count: candidate.spans.len() as f32,
            best_field: Some(best.field),
        }
    }

    /// Combines factors with the configured multipliers.
    pub fn aggregate(&self, factors: &RankFactors) -> f32 {
        let w = &self.weights;
        let score = factors.priority * w.priority
            + factors.ratio * w.ratio
            + factors.position * w.position
            + factors.match_count * w.match_count;
        if score.is_finite() { score } else { 0.0 }
    }

    /// Scores a single span.
    fn span_factors(&self, span: &MatchSpan) -> SpanFactors {
        let len = span.field_len();
        let (ratio, position) = match (len, span.start()) {
            (0, _) | (_, None) => (0.0, 0.0),
            (len, Some(start)) => {
                let len_f = len as f32;
                let ratio = span.matched_len() as f32 / len_f;
                let position = 1.0 - start.min(len) as f32 / len_f;
                (ratio, position)
            }
        };
        SpanFactors {
            field: span.field,
            priority: self.field_weight(span.field),
            ratio,
            position,
        }
    }
}

/// Factors of one span, used to pick a candidate's best span.
#[derive(Debug, Clone, Copy)]
struct SpanFactors {
    /// The span's field.
    field: FieldKey,
    /// Field weight.
    priority: f32,
    /// Matched fraction of the field.
    ratio: f32,
    /// Start-of-field proximity.
    position: f32,
}

impl SpanFactors {
    /// Returns true when `self` is strictly better than `other`.
    fn beats(&self, other: &Self) -> bool {
        self.priority
            .total_cmp(&other.priority)
            .then(self.ratio.total_cmp(&other.ratio))
            .then(self.position.total_cmp(&other.position))
            == Ordering::Greater
    }
}
