//! Injected observation of ranking and classification.
//!
//! The ranker and classifier report through a [`MatchObserver`] instead of logging directly, so
//! their results do not depend on whether anything is listening.

use qs_entry::SearchEntry;
use tracing::debug;

use crate::{MatchAnalysis, RankedCandidate};

/// Receives ranking and classification events.
pub trait MatchObserver: Send + Sync {
    /// Called after a candidate list was ranked.
    fn on_ranked(&self, _query: &str, _ranked: &[RankedCandidate<'_>]) {}

    /// Called after a candidate was classified.
    fn on_classified(&self, _query: &str, _entry: &SearchEntry, _analysis: &MatchAnalysis) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {}

/// Observer that emits `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    /// Number of top candidates to log per ranking.
    top: usize,
}

impl TracingObserver {
    /// Creates an observer logging the top `top` candidates of each ranking.
    pub fn new(top: usize) -> Self {
        Self { top }
    }
}

impl MatchObserver for TracingObserver {
    fn on_ranked(&self, query: &str, ranked: &[RankedCandidate<'_>]) {
        debug!(query, candidates = ranked.len(), "ranked");
        for (rank, candidate) in ranked.iter().take(self.top).enumerate() {
            let f = &candidate.factors;
            debug!(
                rank,
                path = %candidate.entry().path,
                score = candidate.rank_score,
                priority = f.priority,
                ratio = f.ratio,
                position = f.position,
                match_count = f.match_count,
                "candidate"
            );
        }
    }

    fn on_classified(&self, query: &str, entry: &SearchEntry, analysis: &MatchAnalysis) {
        debug!(
            query,
            path = %entry.path,
            intent = %analysis.intent,
            confidence = analysis.confidence,
            heading = analysis.heading.as_deref(),
            "classified"
        );
    }
}
