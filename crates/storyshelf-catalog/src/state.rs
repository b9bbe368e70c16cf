//! Visitor-controlled filter state.

use std::collections::BTreeSet;

use serde::Serialize;

/// Selected tags plus the free-text query.
///
/// Starts empty. Mutated only through [`toggle_tag`](Self::toggle_tag),
/// [`set_query`](Self::set_query) and [`clear`](Self::clear).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    selected_tags: BTreeSet<String>,
    query: String,
}

impl FilterState {
    /// Empty state: no tags, empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `tag` in the selection. Returns whether the tag is
    /// selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_string());
            true
        }
    }

    /// Replace the query with `query`, stored verbatim.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Reset tags and query together. A no-op when nothing is active.
    pub fn clear(&mut self) {
        self.selected_tags.clear();
        self.query.clear();
    }

    /// The selected tags.
    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.selected_tags
    }

    /// Whether `tag` is selected.
    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected_tags.contains(tag)
    }

    /// The query as entered.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query with surrounding whitespace removed; `None` if blank.
    pub fn effective_query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// True iff a tag is selected or the raw query is non-empty.
    ///
    /// A whitespace-only query counts as active here even though it does
    /// not filter anything.
    pub fn has_active_filters(&self) -> bool {
        !self.selected_tags.is_empty() || !self.query.is_empty()
    }
}
