//! Fuzzy search infrastructure for Storyshelf.
//!
//! Items are matched on their title, on each tag, and on their optional
//! description using approximate substring matching: a field matches when
//! the fewest edits needed to find the query somewhere in the field, divided
//! by the query length, stays within the configured threshold. Where the
//! match occurs in the field does not matter.
//!
//! # Modules
//!
//! - [`types`]: `SearchConfig` and `SearchHit`
//! - [`matcher`]: the approximate substring matcher
//! - [`index`]: `FuzzyIndex`, built once per corpus
//! - [`cache`]: `IndexCache`, memoizing the index against a `CorpusVersion`

#![doc = include_str!("../README.md")]

pub mod cache;
pub mod index;
pub mod matcher;
pub mod types;

pub use cache::{CorpusVersion, IndexCache};
pub use index::FuzzyIndex;
pub use matcher::{FuzzyMatcher, Pattern};
pub use types::{MatchedField, SearchConfig, SearchHit};
