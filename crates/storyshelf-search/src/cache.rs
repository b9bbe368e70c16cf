//! Memoization of the search index against corpus identity.
//!
//! Building a [`FuzzyIndex`] folds every searchable field of every item, so
//! it is done once per corpus. A corpus is identified by a [`CorpusVersion`]
//! token handed out when the corpus is created; the cache rebuilds only when
//! it is asked for a version it has not seen last.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use storyshelf_core::Searchable;

use crate::index::FuzzyIndex;
use crate::types::SearchConfig;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Identity token for an immutable corpus.
///
/// Every call to [`CorpusVersion::next`] returns a fresh, never-repeated
/// token for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CorpusVersion(u64);

impl CorpusVersion {
    /// Allocate a new version token.
    pub fn next() -> Self {
        Self(NEXT_VERSION.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Single-entry cache holding the index for the most recent corpus version.
#[derive(Debug)]
pub struct IndexCache {
    config: SearchConfig,
    entry: Option<(CorpusVersion, Arc<FuzzyIndex>)>,
    builds: usize,
}

impl IndexCache {
    /// Create an empty cache.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            entry: None,
            builds: 0,
        }
    }

    /// Return the index for `version`, building it from `items` if the
    /// cached entry belongs to a different version (or there is none).
    ///
    /// `items` must be the corpus `version` was issued for.
    pub fn get_or_build<T: Searchable>(
        &mut self,
        version: CorpusVersion,
        items: &[T],
    ) -> Arc<FuzzyIndex> {
        if let Some((cached, index)) = &self.entry {
            if *cached == version {
                return Arc::clone(index);
            }
        }

        log::debug!("Index cache miss for corpus version {}", version.get());
        let index = Arc::new(FuzzyIndex::build(items, &self.config));
        self.entry = Some((version, Arc::clone(&index)));
        self.builds += 1;
        index
    }

    /// Drop the cached index so the next lookup rebuilds.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Version of the cached index, if any.
    pub fn cached_version(&self) -> Option<CorpusVersion> {
        self.entry.as_ref().map(|(version, _)| *version)
    }

    /// How many times an index has been built by this cache.
    pub fn build_count(&self) -> usize {
        self.builds
    }

    /// The search configuration used for builds.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Default for IndexCache {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doc(String);

    impl Searchable for Doc {
        fn title(&self) -> &str {
            &self.0
        }

        fn tags(&self) -> &[String] {
            &[]
        }

        fn description(&self) -> Option<&str> {
            None
        }
    }

    fn docs(titles: &[&str]) -> Vec<Doc> {
        titles.iter().map(|t| Doc(t.to_string())).collect()
    }

    #[test]
    fn test_corpus_version_unique() {
        let a = CorpusVersion::next();
        let b = CorpusVersion::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn test_cache_builds_once_per_version() {
        let mut cache = IndexCache::default();
        let items = docs(&["Rebase tutorial"]);
        let version = CorpusVersion::next();

        let first = cache.get_or_build(version, &items);
        let second = cache.get_or_build(version, &items);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.build_count(), 1);
        assert_eq!(cache.cached_version(), Some(version));
    }

    #[test]
    fn test_cache_rebuilds_on_new_version() {
        let mut cache = IndexCache::default();
        let old = docs(&["Rebase tutorial"]);
        let new = docs(&["Rebase tutorial", "Flaky tests"]);

        let first = cache.get_or_build(CorpusVersion::next(), &old);
        let second = cache.get_or_build(CorpusVersion::next(), &new);

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(cache.build_count(), 2);
    }

    #[test]
    fn test_cache_invalidate() {
        let mut cache = IndexCache::default();
        let items = docs(&["Rebase tutorial"]);
        let version = CorpusVersion::next();

        cache.get_or_build(version, &items);
        cache.invalidate();
        assert!(cache.cached_version().is_none());

        cache.get_or_build(version, &items);
        assert_eq!(cache.build_count(), 2);
    }

    #[test]
    fn test_cache_uses_config_threshold() {
        let mut cache = IndexCache::new(SearchConfig { threshold: 0.0 });
        let items = docs(&["story"]);
        let index = cache.get_or_build(CorpusVersion::next(), &items);
        assert!(index.search("stroy").is_empty());
        assert_eq!(cache.config().threshold, 0.0);
    }
}
