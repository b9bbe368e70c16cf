//! Tag frequency table and tag helpers.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::story::Story;

/// Occurrence count per tag across a corpus.
///
/// Missing tags count as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagCounts(HashMap<String, usize>);

impl TagCounts {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every tag occurrence in `stories`.
    pub fn from_stories(stories: &[Story]) -> Self {
        let mut counts = HashMap::new();
        for tag in stories.iter().flat_map(|s| s.tags.iter()) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// Count for `tag`, zero if unknown.
    pub fn get(&self, tag: &str) -> usize {
        self.0.get(tag).copied().unwrap_or(0)
    }

    /// Set the count for `tag`.
    pub fn insert(&mut self, tag: impl Into<String>, count: usize) {
        self.0.insert(tag.into(), count);
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tags ordered by descending count, ties alphabetical.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> =
            self.0.iter().map(|(tag, count)| (tag.as_str(), *count)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Reorder `tags` by descending count.
    ///
    /// The sort is stable, so tags with equal counts keep their relative
    /// order from the input.
    pub fn sort_by_frequency<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        let mut sorted: Vec<String> = tags.iter().map(|t| t.as_ref().to_string()).collect();
        sorted.sort_by_key(|tag| std::cmp::Reverse(self.get(tag)));
        sorted
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for TagCounts {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(tag, count)| (tag.into(), count)).collect())
    }
}

/// All distinct tags in the corpus, alphabetically.
pub fn all_tags(stories: &[Story]) -> Vec<String> {
    stories
        .iter()
        .flat_map(|s| s.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Stories carrying `tag`, in corpus order.
pub fn stories_with_tag<'a>(stories: &'a [Story], tag: &str) -> Vec<&'a Story> {
    stories.iter().filter(|s| s.has_tag(tag)).collect()
}
