//! In-page filtering data.
//!
//! A built catalog page is static HTML, so the filters run in the browser.
//! [`ClientData`] is the JSON the page embeds for its script: the searchable
//! fields of every story in corpus order, the match threshold, the starting
//! filter state, and the rotation cycle for playful cards. The script in
//! `templates/catalog.js` applies the same rules as
//! [`visible_positions`](crate::filter::visible_positions).

use serde::Serialize;
use storyshelf_core::{Error, Result};
use storyshelf_search::FuzzyMatcher;

use crate::card::ROTATIONS;
use crate::view::{CatalogView, Variant};

/// Filtering script shipped with every catalog page.
pub const FILTER_SCRIPT: &str = include_str!("../templates/catalog.js");

/// Searchable fields of one story.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClientItem {
    pub slug: String,
    pub title: String,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

/// Everything the page script needs to filter without a server.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClientData {
    /// Normalized fuzzy threshold.
    pub threshold: f64,
    /// Tags selected when the page was rendered.
    pub selected: Vec<String>,
    /// Query as entered when the page was rendered.
    pub query: String,
    /// Playful rotation cycle; empty for the technical variant.
    pub rotations: Vec<&'static str>,
    pub items: Vec<ClientItem>,
}

impl ClientData {
    /// Snapshot of `view` for the page script.
    pub fn from_view(view: &CatalogView) -> Self {
        let items = view
            .corpus()
            .stories()
            .iter()
            .map(|story| ClientItem {
                slug: story.slug.clone(),
                title: story.title.clone(),
                tags: story.tags.clone(),
                description: story.description.clone(),
            })
            .collect();
        let rotations = match view.options().variant {
            Variant::Playful => ROTATIONS.to_vec(),
            Variant::Technical => Vec::new(),
        };

        Self {
            threshold: FuzzyMatcher::new(view.options().search.threshold).threshold(),
            selected: view.state().selected_tags().iter().cloned().collect(),
            query: view.state().query().to_string(),
            rotations,
            items,
        }
    }

    /// JSON safe to place inside a `<script>` element.
    ///
    /// `<` only occurs inside JSON strings, where `\u003c` decodes to the
    /// same character, so no `</script>` can close the element early.
    pub fn to_script_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)
            .map_err(|e| Error::serialization(format!("catalog data: {e}")))?;
        Ok(json.replace('<', "\\u003c"))
    }
}
