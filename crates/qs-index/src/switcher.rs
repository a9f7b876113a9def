//! The quick-switcher facade.
//!
//! [`Switcher`] wires the updater, ranker, classifier and heading jump policy together behind
//! the operations a host calls: suggestions per keystroke, classification of the highlighted
//! candidate, filter changes and change notifications.

use std::sync::Arc;

use qs_config::{Config, Settings};
use qs_entry::{DOCUMENT_EXTENSION, SearchEntry};
use qs_match::{
    FuzzyMatchEngine, MatchAnalysis, MatchIntentClassifier, MatchObserver, RankedCandidate,
    RawCandidate, RelevanceRanker, SkimEngine, decide,
};
use serde::Serialize;
use tracing::debug;

use crate::{EntryFilter, EntrySource, IncrementalIndexUpdater, IndexError, IndexEvent};

/// What selecting a candidate should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Selection {
    /// Open the file at its top.
    OpenFile {
        /// Vault-relative path.
        path: String,
    },
    /// Open the file and navigate to a heading.
    OpenHeading {
        /// Vault-relative path.
        path: String,
        /// Heading text to navigate to.
        heading: String,
    },
    /// Open a web link.
    OpenUrl {
        /// The link target.
        url: String,
    },
    /// Create a new note.
    CreateFile {
        /// Vault-relative path of the note to create.
        path: String,
    },
}

/// Incremental quick-switcher over one catalog.
pub struct Switcher<E = SkimEngine> {
    /// Owns the catalog and the engine.
    updater: IncrementalIndexUpdater<E>,
    /// Orders raw candidates.
    ranker: RelevanceRanker,
    /// Classifies the highlighted candidate.
    classifier: MatchIntentClassifier,
    /// Result limit and heading jump settings.
    settings: Settings,
}

impl Switcher<SkimEngine> {
    /// Creates a switcher over the skim engine.
    pub fn from_config(config: &Config) -> Self {
        Self::new(SkimEngine::new(), config)
    }
}

impl<E: FuzzyMatchEngine> Switcher<E> {
    /// Creates an empty switcher over `engine`.
    pub fn new(engine: E, config: &Config) -> Self {
        let filter = EntryFilter::from_settings(&config.filter);
        Self {
            updater: IncrementalIndexUpdater::with_entries(engine, filter, []),
            ranker: RelevanceRanker::new(config.weights.clone()),
            classifier: MatchIntentClassifier::new(),
            settings: config.settings.clone(),
        }
    }

    /// Attaches an observer to ranking and classification.
    pub fn with_observer(mut self, observer: Arc<dyn MatchObserver>) -> Self {
        self.ranker = self.ranker.with_observer(Arc::clone(&observer));
        self.classifier = self.classifier.with_observer(observer);
        self
    }

    /// Returns the settings in effect.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the updater.
    pub fn updater(&self) -> &IncrementalIndexUpdater<E> {
        &self.updater
    }

    /// Returns the updater, for queuing notifications until the host settles.
    pub fn updater_mut(&mut self) -> &mut IncrementalIndexUpdater<E> {
        &mut self.updater
    }

    /// Returns the ranker.
    pub fn ranker(&self) -> &RelevanceRanker {
        &self.ranker
    }

    /// Replaces the catalog with the contents of `source`.
    pub fn load(&mut self, source: &impl EntrySource) -> Result<(), IndexError> {
        self.updater
            .rebuild(source, self.settings.include_unresolved)
    }

    /// Returns ranked suggestions for `query`, at most `max_results` of them.
    pub fn suggestions(&self, query: &str) -> Vec<RankedCandidate<'_>> {
        if query.trim().is_empty() || self.settings.max_results == 0 {
            return Vec::new();
        }
        let raw = self.updater.search(query, None);
        if raw.is_empty() {
            return Vec::new();
        }
        let total = raw.len();
        let mut ranked = self.ranker.rank(raw, query);
        ranked.truncate(self.settings.max_results);
        debug!(query, total, shown = ranked.len(), "suggestions");
        ranked
    }

    /// Classifies `candidate` and applies the heading jump policy.
    pub fn classify_selection(&self, candidate: &RawCandidate<'_>, query: &str) -> MatchAnalysis {
        let mut analysis = self.classifier.classify(candidate, query);
        analysis.jump_to_heading = self.settings.auto_jump_to_heading
            && decide(&analysis, query, self.settings.heading_jump_strategy);
        analysis
    }

    /// Returns what selecting `candidate` should do.
    pub fn select(&self, candidate: &RawCandidate<'_>, query: &str) -> Selection {
        let entry = candidate.entry;
        if let Some(url) = entry.url() {
            return Selection::OpenUrl {
                url: url.to_string(),
            };
        }
        if !entry.is_created() {
            return Selection::CreateFile {
                path: entry.path.clone(),
            };
        }
        let analysis = self.classify_selection(candidate, query);
        match analysis.heading {
            Some(heading) if analysis.jump_to_heading => Selection::OpenHeading {
                path: entry.path.clone(),
                heading,
            },
            _ => Selection::OpenFile {
                path: entry.path.clone(),
            },
        }
    }

    /// Returns a placeholder for creating a note named after `query`.
    ///
    /// A trailing `.md` is ignored. Returns `None` for a blank query or when an existing
    /// entry already has that basename.
    pub fn creation_target(&self, query: &str) -> Option<SearchEntry> {
        let name = strip_document_extension(query.trim());
        if name.is_empty() {
            return None;
        }
        let wanted = name.to_lowercase();
        let basename = wanted.rsplit('/').next().unwrap_or(&wanted);
        let taken = self
            .updater
            .catalog()
            .all()
            .iter()
            .any(|e| e.is_created() && !e.is_web_url() && e.basename.to_lowercase() == basename);
        (!taken).then(|| SearchEntry::placeholder(name))
    }

    /// Changes the searchable subset.
    pub fn apply_filter(&mut self, filter: EntryFilter) {
        debug!(%filter, "filter changed");
        self.updater.set_filter(filter);
    }

    /// Reports a created resource.
    pub fn notify_create(&mut self, entry: SearchEntry) -> bool {
        self.updater.apply(IndexEvent::Create(entry))
    }

    /// Reports a deleted resource.
    pub fn notify_delete(&mut self, path: &str) -> bool {
        self.updater.apply(IndexEvent::Delete(path.to_string()))
    }

    /// Reports a moved resource.
    pub fn notify_rename(&mut self, old_path: &str, entry: SearchEntry) -> bool {
        self.updater.apply(IndexEvent::Rename {
            old_path: old_path.to_string(),
            entry,
        })
    }

    /// Reports finished link resolution with every outgoing link target.
    ///
    /// Ignored when unresolved targets are not searchable.
    pub fn notify_resolve_unresolved(&mut self, links: Vec<String>) -> bool {
        if !self.settings.include_unresolved {
            return false;
        }
        self.updater.apply(IndexEvent::ResolveUnresolved(links))
    }
}

/// Strips a trailing `.md`, ignoring case.
fn strip_document_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext)) if ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION) => stem,
        _ => name,
    }
}
