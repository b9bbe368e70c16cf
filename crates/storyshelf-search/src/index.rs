//! The fuzzy search index.
//!
//! `FuzzyIndex` holds a case-folded copy of the searchable fields of every
//! item in a corpus, in corpus order. It is immutable once built; a new
//! corpus needs a new index (see [`IndexCache`](crate::IndexCache)).

use storyshelf_core::Searchable;

use crate::matcher::{fold, FuzzyMatcher, Pattern};
use crate::types::{MatchedField, SearchConfig, SearchHit};

/// Folded searchable fields of one item.
#[derive(Clone, Debug)]
struct IndexRecord {
    title: Vec<char>,
    tags: Vec<Vec<char>>,
    description: Option<Vec<char>>,
}

impl IndexRecord {
    fn from_item<T: Searchable + ?Sized>(item: &T) -> Self {
        Self {
            title: fold(item.title()),
            tags: item.tags().iter().map(|t| fold(t)).collect(),
            description: item.description().map(fold),
        }
    }

    /// Best (lowest) score over all fields, with the field that produced it.
    fn best_score(&self, matcher: &FuzzyMatcher, pattern: &Pattern) -> Option<(f64, MatchedField)> {
        let mut best: Option<(f64, MatchedField)> = None;
        let mut consider = |score: Option<f64>, field: MatchedField| {
            if let Some(score) = score {
                if best.is_none_or(|(current, _)| score < current) {
                    best = Some((score, field));
                }
            }
        };

        consider(matcher.score(pattern, &self.title), MatchedField::Title);
        for tag in &self.tags {
            consider(matcher.score(pattern, tag), MatchedField::Tag);
        }
        if let Some(description) = &self.description {
            consider(matcher.score(pattern, description), MatchedField::Description);
        }
        best
    }
}

/// Fuzzy search index over title, tags and description.
///
/// # Example
///
/// ```
/// use storyshelf_core::Searchable;
/// use storyshelf_search::{FuzzyIndex, SearchConfig};
///
/// struct Doc(&'static str, Vec<String>);
///
/// impl Searchable for Doc {
///     fn title(&self) -> &str { self.0 }
///     fn tags(&self) -> &[String] { &self.1 }
///     fn description(&self) -> Option<&str> { None }
/// }
///
/// let docs = vec![
///     Doc("Refactor with Claude", vec!["ai".into(), "refactor".into()]),
///     Doc("Rebase tutorial", vec!["git".into()]),
/// ];
/// let index = FuzzyIndex::build(&docs, &SearchConfig::default());
///
/// let hits = index.search("rebase");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].index, 1);
/// ```
#[derive(Clone, Debug)]
pub struct FuzzyIndex {
    records: Vec<IndexRecord>,
    matcher: FuzzyMatcher,
}

impl FuzzyIndex {
    /// Build an index over `items`. Never fails; an empty corpus yields an
    /// index that matches nothing for a non-empty query.
    pub fn build<T: Searchable>(items: &[T], config: &SearchConfig) -> Self {
        let records: Vec<IndexRecord> = items.iter().map(IndexRecord::from_item).collect();
        log::debug!(
            "Built fuzzy index over {} items (threshold {})",
            records.len(),
            config.threshold
        );
        Self {
            records,
            matcher: FuzzyMatcher::new(config.threshold),
        }
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index covers no items.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The matcher used for queries.
    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    /// Search the index.
    ///
    /// An empty or whitespace-only query bypasses matching and returns every
    /// item in corpus order with score `0.0` and no field. Otherwise the
    /// trimmed query is matched and hits are ordered by ascending score, then
    /// by corpus position.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        let Some(pattern) = self.matcher.pattern(query) else {
            return (0..self.records.len())
                .map(|index| SearchHit {
                    index,
                    score: 0.0,
                    field: None,
                })
                .collect();
        };

        let mut hits: Vec<SearchHit> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                record
                    .best_score(&self.matcher, &pattern)
                    .map(|(score, field)| SearchHit {
                        index,
                        score,
                        field: Some(field),
                    })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
        log::trace!("Query {:?} matched {} of {} items", query, hits.len(), self.len());
        hits
    }

    /// Membership mask for a query: `mask[i]` is true iff item `i` matches.
    ///
    /// This is the form the filter pipeline consumes.
    pub fn match_mask(&self, query: &str) -> Vec<bool> {
        let mut mask = vec![false; self.records.len()];
        for hit in self.search(query) {
            mask[hit.index] = true;
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doc {
        title: String,
        tags: Vec<String>,
        description: Option<String>,
    }

    impl Doc {
        fn new(title: &str, tags: &[&str], description: Option<&str>) -> Self {
            Self {
                title: title.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                description: description.map(str::to_string),
            }
        }
    }

    impl Searchable for Doc {
        fn title(&self) -> &str {
            &self.title
        }

        fn tags(&self) -> &[String] {
            &self.tags
        }

        fn description(&self) -> Option<&str> {
            self.description.as_deref()
        }
    }

    fn corpus() -> Vec<Doc> {
        vec![
            Doc::new("Refactor with Claude", &["ai", "refactor"], None),
            Doc::new("Rebase tutorial", &["git"], Some("Interactive rebase walkthrough")),
            Doc::new(
                "Flaky tests",
                &["testing", "ci"],
                Some("A long story about chasing nondeterminism in the pipeline"),
            ),
        ]
    }

    fn index() -> FuzzyIndex {
        FuzzyIndex::build(&corpus(), &SearchConfig::default())
    }

    #[test]
    fn test_build_len() {
        let index = index();
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_search_title() {
        let hits = index().search("rebase");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);
        assert_eq!(hits[0].field, Some(MatchedField::Title));
    }

    #[test]
    fn test_search_tag() {
        let hits = index().search("testing");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 2);
        assert_eq!(hits[0].field, Some(MatchedField::Tag));
    }

    #[test]
    fn test_search_description_with_typo() {
        let hits = index().search("stroy");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 2);
        assert_eq!(hits[0].field, Some(MatchedField::Description));
        assert_eq!(hits[0].score, 0.2);
    }

    #[test]
    fn test_search_no_match() {
        assert!(index().search("kubernetes").is_empty());
    }

    #[test]
    fn test_search_empty_query_returns_all() {
        let index = index();
        for query in ["", "   ", "\t\n"] {
            let hits = index.search(query);
            let positions: Vec<usize> = hits.iter().map(|h| h.index).collect();
            assert_eq!(positions, vec![0, 1, 2]);
            assert!(hits.iter().all(|h| h.field.is_none()));
        }
    }

    #[test]
    fn test_search_trims_query() {
        assert_eq!(index().search("  rebase  "), index().search("rebase"));
    }

    #[test]
    fn test_search_orders_by_score_then_position() {
        let docs = vec![
            Doc::new("Rebsae notes", &[], None),
            Doc::new("Rebase basics", &[], None),
            Doc::new("More rebase", &[], None),
        ];
        let index = FuzzyIndex::build(&docs, &SearchConfig::default());
        let order: Vec<usize> = index.search("rebase").iter().map(|h| h.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_empty_corpus() {
        let docs: Vec<Doc> = Vec::new();
        let index = FuzzyIndex::build(&docs, &SearchConfig::default());
        assert!(index.is_empty());
        assert!(index.search("anything").is_empty());
        assert!(index.search("").is_empty());
        assert!(index.match_mask("anything").is_empty());
    }

    #[test]
    fn test_match_mask() {
        let mask = index().match_mask("git");
        assert_eq!(mask, vec![false, true, false]);
    }

    #[test]
    fn test_item_without_description() {
        let docs = vec![Doc::new("Untitled", &[], None)];
        let index = FuzzyIndex::build(&docs, &SearchConfig::default());
        assert!(index.search("walkthrough").is_empty());
    }
}
