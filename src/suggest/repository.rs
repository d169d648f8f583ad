//! Question repository: owns the suggestion corpus and decides when to
//! reload it from disk.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use super::corpus::{Corpus, CorpusLayout};
use super::index::{ArabicQuestionIndex, NormalizedIndex, QuestionCatalog};
use super::ranker::{rank_suggestions, Match};
use super::SuggestError;

/// Source of "now" for staleness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Indices built from one read of the corpus files.
#[derive(Debug)]
pub struct CorpusSnapshot {
    pub index: NormalizedIndex,
    pub arabic: ArabicQuestionIndex,
    pub catalog: QuestionCatalog,
    pub built_at: DateTime<Utc>,
}

impl CorpusSnapshot {
    pub fn build(corpus: Corpus, built_at: DateTime<Utc>) -> Self {
        let catalog = QuestionCatalog::from_variants(&corpus.variants);
        let index = NormalizedIndex::from_variants(corpus.variants);
        Self {
            index,
            arabic: corpus.arabic,
            catalog,
            built_at,
        }
    }
}

/// Lazily loaded, time-limited cache of the question corpus.
///
/// The snapshot is rebuilt whole once it is older than `ttl`. Two callers
/// hitting a cold or stale cache at the same moment may both rebuild; the last
/// one to finish wins and both results are equivalent.
pub struct QuestionRepository {
    layout: CorpusLayout,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    snapshot: RwLock<Option<Arc<CorpusSnapshot>>>,
}

impl QuestionRepository {
    pub fn new(layout: CorpusLayout, ttl: Duration) -> Self {
        Self::with_clock(layout, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(layout: CorpusLayout, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            layout,
            ttl,
            clock,
            snapshot: RwLock::new(None),
        }
    }

    /// True when nothing is loaded yet or the loaded snapshot has expired.
    pub fn is_stale(&self) -> bool {
        match self.snapshot.read().as_ref() {
            Some(snapshot) => self.clock.now() - snapshot.built_at > self.ttl,
            None => true,
        }
    }

    /// Current snapshot, reloading from disk first if it is stale.
    pub fn rebuild_if_stale(&self) -> Arc<CorpusSnapshot> {
        {
            let guard = self.snapshot.read();
            if let Some(snapshot) = guard.as_ref() {
                if self.clock.now() - snapshot.built_at <= self.ttl {
                    return Arc::clone(snapshot);
                }
            }
        }
        self.rebuild()
    }

    /// Reload unconditionally and swap in the new snapshot.
    pub fn rebuild(&self) -> Arc<CorpusSnapshot> {
        let started = std::time::Instant::now();
        let corpus = Corpus::load(&self.layout);
        let snapshot = Arc::new(CorpusSnapshot::build(corpus, self.clock.now()));

        tracing::info!(
            "Suggestion index rebuilt: {} key(s), {} variant(s) in {:?}",
            snapshot.index.key_count(),
            snapshot.index.variant_count(),
            started.elapsed()
        );

        *self.snapshot.write() = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Ranked suggestions for `query` against the current snapshot.
    pub fn suggest(&self, query: &str) -> Result<Vec<Match>, SuggestError> {
        if query.trim().is_empty() {
            return Err(SuggestError::EmptyQuery);
        }
        let snapshot = self.rebuild_if_stale();
        rank_suggestions(query, &snapshot.index, &snapshot.arabic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::path::Path;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn starting_at(t: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(t)))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock()
        }
    }

    fn layout_in(dir: &Path) -> CorpusLayout {
        CorpusLayout::standard(&dir.join("quran_data"), &dir.join("qa"))
    }

    fn write_translations(layout: &CorpusLayout, body: &str) {
        let path = &layout.translation_files[0];
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn test_cold_repository_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let repo = QuestionRepository::new(layout_in(dir.path()), Duration::hours(1));
        assert!(repo.is_stale());
        repo.rebuild_if_stale();
        assert!(!repo.is_stale());
    }

    #[test]
    fn test_snapshot_reused_within_ttl_and_rebuilt_after() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        write_translations(&layout, "{\"qid\": \"Q1\", \"query_id\": \"Apa itu sabar?\"}\n");

        let clock = ManualClock::starting_at(Utc::now());
        let repo = QuestionRepository::with_clock(layout.clone(), Duration::hours(1), clock.clone());

        let first = repo.rebuild_if_stale();
        assert_eq!(first.index.variant_count(), 1);

        // New data on disk is not picked up while the snapshot is fresh
        write_translations(
            &layout,
            "{\"qid\": \"Q1\", \"query_id\": \"Apa itu sabar?\"}\n\
             {\"qid\": \"Q2\", \"query_id\": \"Apa itu iman?\"}\n",
        );
        clock.advance(Duration::minutes(59));
        let second = repo.rebuild_if_stale();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.index.variant_count(), 1);

        clock.advance(Duration::minutes(2));
        assert!(repo.is_stale());
        let third = repo.rebuild_if_stale();
        assert!(!Arc::ptr_eq(&second, &third));
        assert_eq!(third.index.variant_count(), 2);
        assert!(third.catalog.get("Q2").is_some());
    }

    #[test]
    fn test_suggest_rejects_blank_query_without_loading() {
        let dir = tempfile::tempdir().unwrap();
        let repo = QuestionRepository::new(layout_in(dir.path()), Duration::hours(1));
        assert_eq!(repo.suggest("   "), Err(SuggestError::EmptyQuery));
        assert!(repo.is_stale());
    }

    #[test]
    fn test_missing_corpus_gives_no_suggestions() {
        let dir = tempfile::tempdir().unwrap();
        let repo = QuestionRepository::new(layout_in(dir.path()), Duration::hours(1));
        assert_eq!(repo.suggest("kehidupan dunia"), Ok(Vec::new()));
    }
}
