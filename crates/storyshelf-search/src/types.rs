//! Search configuration and result types.

use serde::{Deserialize, Serialize};

/// Default match looseness: up to 3 edits per 10 query characters.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Configuration for the fuzzy search index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum accepted `errors / query_length` ratio, in `[0.0, 1.0]`.
    /// `0.0` only accepts exact substrings.
    pub threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Which indexed field produced a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
    /// The item title.
    Title,
    /// One of the item's tags.
    Tag,
    /// The item description.
    Description,
}

/// A single search hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the item in the corpus the index was built from.
    pub index: usize,
    /// Best score across fields; `0.0` is an exact substring match.
    pub score: f64,
    /// Field that produced the best score. `None` when no query was applied.
    pub field: Option<MatchedField>,
}
