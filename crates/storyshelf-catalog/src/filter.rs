//! The filter pipeline.
//!
//! Two independent filters, each active only when it has input:
//!
//! - tags: an item survives if it carries at least one selected tag (OR)
//! - query: an item survives if the fuzzy index matches it
//!
//! The visible set is their intersection, in corpus order.

use storyshelf_core::Searchable;
use storyshelf_search::FuzzyIndex;

use crate::state::FilterState;

/// Corpus positions of the items that pass both filters, ascending.
///
/// `index` must have been built over `items`.
pub fn visible_positions<T: Searchable>(
    items: &[T],
    index: &FuzzyIndex,
    state: &FilterState,
) -> Vec<usize> {
    let selected = state.selected_tags();
    let mask = state.effective_query().map(|q| index.match_mask(q));

    items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            selected.is_empty() || item.tags().iter().any(|tag| selected.contains(tag))
        })
        .filter(|(pos, _)| {
            mask.as_ref()
                .is_none_or(|mask| mask.get(*pos).copied().unwrap_or(false))
        })
        .map(|(pos, _)| pos)
        .collect()
}

/// The items that pass both filters, in corpus order.
pub fn filter_items<'a, T: Searchable>(
    items: &'a [T],
    index: &FuzzyIndex,
    state: &FilterState,
) -> Vec<&'a T> {
    visible_positions(items, index, state)
        .into_iter()
        .map(|pos| &items[pos])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use storyshelf_content::Story;
    use storyshelf_search::SearchConfig;

    fn corpus() -> Vec<Story> {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        vec![
            Story::new("Refactor with Claude", "refactor", d).with_tags(["ai", "refactor"]),
            Story::new("Rebase tutorial", "rebase", d).with_tags(["git"]),
            Story::new("Flaky tests", "flaky", d)
                .with_tags(["testing", "ai"])
                .with_description("Chasing nondeterminism in CI"),
        ]
    }

    fn run(tags: &[&str], query: &str) -> Vec<usize> {
        let items = corpus();
        let index = FuzzyIndex::build(&items, &SearchConfig::default());
        let mut state = FilterState::new();
        for tag in tags {
            state.toggle_tag(tag);
        }
        state.set_query(query);
        visible_positions(&items, &index, &state)
    }

    #[test]
    fn test_no_filters_shows_all() {
        assert_eq!(run(&[], ""), vec![0, 1, 2]);
    }

    #[test]
    fn test_single_tag() {
        assert_eq!(run(&["git"], ""), vec![1]);
    }

    #[test]
    fn test_tags_are_or() {
        assert_eq!(run(&["git", "testing"], ""), vec![1, 2]);
    }

    #[test]
    fn test_query_only() {
        assert_eq!(run(&[], "rebase"), vec![1]);
    }

    #[test]
    fn test_tags_and_query_intersect() {
        assert_eq!(run(&["ai"], "rebase"), Vec::<usize>::new());
        assert_eq!(run(&["ai"], "flaky"), vec![2]);
    }

    #[test]
    fn test_whitespace_query_bypasses_search() {
        assert_eq!(run(&[], "   "), vec![0, 1, 2]);
        assert_eq!(run(&["ai"], " \t"), vec![0, 2]);
    }

    #[test]
    fn test_unknown_tag_yields_nothing() {
        assert!(run(&["kubernetes"], "").is_empty());
    }

    #[test]
    fn test_filter_items_returns_references() {
        let items = corpus();
        let index = FuzzyIndex::build(&items, &SearchConfig::default());
        let mut state = FilterState::new();
        state.toggle_tag("ai");
        let visible = filter_items(&items, &index, &state);
        let slugs: Vec<&str> = visible.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["refactor", "flaky"]);
    }
}
