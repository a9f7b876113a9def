//! Relevance ranking and match-intent classification for qs.
//!
//! Per keystroke the pipeline is:
//!
//! 1. a [`FuzzyMatchEngine`] produces raw candidates with per-field [`MatchSpan`]s
//! 2. [`RelevanceRanker::rank`] orders them by weighted field priority, match ratio, match
//!    position and match count
//! 3. [`MatchIntentClassifier::classify`] decides what selecting the highlighted candidate means
//! 4. [`decide`] applies the configured [`HeadingJumpStrategy`](qs_config::HeadingJumpStrategy)
//!
//! Ranking and classification are pure: they never fail, never suspend, and report through an
//! injected [`MatchObserver`] rather than logging on their own.

#![warn(missing_docs)]

mod classifier;
mod confidence;
mod engine;
mod observer;
mod policy;
mod ranker;
mod span;

pub use classifier::{
    DisplayInfo, FALLBACK_CONFIDENCE, MatchAnalysis, MatchIntent, MatchIntentClassifier,
    TITLE_ACCEPTANCE,
};
pub use confidence::{OFFSET_POSITION_WEIGHT, confidence, levenshtein, similarity};
pub use engine::{FuzzyMatchEngine, RawMatch, SkimEngine};
pub use observer::{MatchObserver, NoopObserver, TracingObserver};
pub use policy::{decide, smart_threshold};
pub use ranker::RelevanceRanker;
pub use span::{MatchSpan, RankFactors, RankedCandidate, RawCandidate};
