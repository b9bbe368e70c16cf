//! The filterable catalog view.
//!
//! [`CatalogView`] owns a corpus, the fuzzy index for it, and the filter
//! state. Every mutation recomputes the visible positions synchronously, so
//! all read accessors reflect the latest state.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storyshelf_content::Story;
use storyshelf_core::Error;
use storyshelf_search::{FuzzyIndex, IndexCache, SearchConfig};

use crate::card::{Card, GridCard, TagChip};
use crate::corpus::Corpus;
use crate::filter::visible_positions;
use crate::state::FilterState;
use crate::url::UrlBuilder;

/// Card presentation style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Rotated sticky notes.
    #[default]
    Playful,
    /// Bordered cards with a tile image.
    Technical,
}

impl Variant {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Playful => "playful",
            Self::Technical => "technical",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "playful" => Ok(Self::Playful),
            "technical" => Ok(Self::Technical),
            other => Err(Error::invalid_data(format!(
                "unknown variant '{other}' (expected 'playful' or 'technical')"
            ))),
        }
    }
}

/// Presentation and search options for a catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    /// Deployment base of the site (e.g. `/` or `/shelf/`).
    pub site_base: String,
    /// Collection path stories live under (e.g. `/stories`).
    pub base_path: String,
    /// Card style.
    pub variant: Variant,
    /// Tile used by technical cards without their own image.
    pub default_tile_image: Option<String>,
    /// Fuzzy search settings.
    pub search: SearchConfig,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            site_base: "/".to_string(),
            base_path: "/stories".to_string(),
            variant: Variant::Playful,
            default_tile_image: None,
            search: SearchConfig::default(),
        }
    }
}

/// Visible and total item counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub visible: usize,
    pub total: usize,
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} items", self.visible, self.total)
    }
}

/// A tag in the filter control list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagButton {
    #[serde(flatten)]
    pub chip: TagChip,
    pub selected: bool,
}

/// Catalog of stories narrowed by tags and a fuzzy query.
#[derive(Debug)]
pub struct CatalogView {
    corpus: Corpus,
    cache: IndexCache,
    index: Arc<FuzzyIndex>,
    state: FilterState,
    options: CatalogOptions,
    urls: UrlBuilder,
    tag_panel_open: bool,
    visible: Vec<usize>,
}

impl CatalogView {
    /// Create a view over `corpus` with empty filters and the tag panel open.
    pub fn new(corpus: Corpus, options: CatalogOptions) -> Self {
        let mut cache = IndexCache::new(options.search.clone());
        let index = cache.get_or_build(corpus.version(), corpus.stories());
        let urls = UrlBuilder::new(&options.site_base);
        let mut view = Self {
            corpus,
            cache,
            index,
            state: FilterState::new(),
            options,
            urls,
            tag_panel_open: true,
            visible: Vec::new(),
        };
        view.refresh();
        view
    }

    /// Swap in a new corpus, keeping the filter state.
    ///
    /// The index is rebuilt only if the corpus version differs from the
    /// current one.
    pub fn replace_corpus(&mut self, corpus: Corpus) {
        self.index = self.cache.get_or_build(corpus.version(), corpus.stories());
        self.corpus = corpus;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.visible = visible_positions(self.corpus.stories(), &self.index, &self.state);
        log::trace!("{}", self.result_summary());
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Flip selection of `tag`. Returns whether it is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let selected = self.state.toggle_tag(tag);
        self.refresh();
        selected
    }

    /// Replace the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
        self.refresh();
    }

    /// Clear tags and query in one step.
    pub fn clear_filters(&mut self) {
        if !self.state.has_active_filters() {
            return;
        }
        self.state.clear();
        self.refresh();
    }

    /// Collapse or expand the tag filter list. Returns the new state.
    pub fn toggle_tag_panel(&mut self) -> bool {
        self.tag_panel_open = !self.tag_panel_open;
        self.tag_panel_open
    }

    // ------------------------------------------------------------------------
    // Derived reads
    // ------------------------------------------------------------------------

    /// Visible stories, in corpus order.
    pub fn visible_items(&self) -> Vec<&Story> {
        let stories = self.corpus.stories();
        self.visible.iter().map(|&pos| &stories[pos]).collect()
    }

    /// Corpus positions of the visible stories.
    pub fn visible_positions(&self) -> &[usize] {
        &self.visible
    }

    /// Filter list entries: every corpus tag by descending frequency, ties
    /// in supplied order.
    pub fn sorted_tags(&self) -> Vec<TagButton> {
        let counts = self.corpus.tag_counts();
        counts
            .sort_by_frequency(self.corpus.all_tags())
            .iter()
            .map(|tag| TagButton {
                chip: TagChip::new(tag, counts),
                selected: self.state.is_selected(tag),
            })
            .collect()
    }

    /// Card models for the visible stories, in display order.
    pub fn cards(&self) -> Vec<Card> {
        self.visible_items()
            .into_iter()
            .enumerate()
            .map(|(position, story)| {
                Card::build(story, position, self.corpus.tag_counts(), &self.urls, &self.options)
            })
            .collect()
    }

    /// Card models for every story in corpus order, flagged by visibility.
    ///
    /// Visible cards take the same grid positions as in [`cards`](Self::cards);
    /// a hidden card takes the position it would get if shown next.
    pub fn grid_cards(&self) -> Vec<GridCard> {
        let counts = self.corpus.tag_counts();
        let mut shown = 0;
        self.corpus
            .stories()
            .iter()
            .enumerate()
            .map(|(position, story)| {
                let visible = self.visible.binary_search(&position).is_ok();
                let card = Card::build(story, shown, counts, &self.urls, &self.options);
                if visible {
                    shown += 1;
                }
                GridCard {
                    card,
                    position,
                    visible,
                }
            })
            .collect()
    }

    /// Visible and total counts.
    pub fn result_summary(&self) -> ResultSummary {
        ResultSummary {
            visible: self.visible.len(),
            total: self.corpus.len(),
        }
    }

    /// Whether a tag is selected or the raw query is non-empty.
    pub fn has_active_filters(&self) -> bool {
        self.state.has_active_filters()
    }

    /// Whether the filters leave nothing visible.
    pub fn is_empty_result(&self) -> bool {
        self.visible.is_empty()
    }

    /// Whether the tag filter list is expanded.
    pub fn is_tag_panel_open(&self) -> bool {
        self.tag_panel_open
    }

    /// Current filter state.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// The corpus.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// View options.
    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// URL builder for the site base.
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// How many times the index has been built for this view.
    pub fn index_builds(&self) -> usize {
        self.cache.build_count()
    }
}
