//! Filterable catalog view for Storyshelf.
//!
//! # Modules
//!
//! - [`corpus`]: the immutable story corpus and its version token
//! - [`state`]: visitor-controlled filter state
//! - [`filter`]: the pure filter pipeline (tags OR, query AND)
//! - [`view`]: `CatalogView`, tying corpus, index, and state together
//! - [`card`]: card view models
//! - [`color`]: tag color classification
//! - [`url`]: base-path aware URL building
//! - [`client`]: data and script for filtering inside the built page
//! - [`render`]: HTML rendering of catalog and story pages

#![doc = include_str!("../README.md")]

pub mod card;
pub mod client;
pub mod color;
pub mod corpus;
pub mod filter;
pub mod render;
pub mod state;
pub mod url;
pub mod view;

pub use card::{Card, GridCard, TagChip, CARD_TAG_LIMIT, ROTATIONS};
pub use client::{ClientData, ClientItem, FILTER_SCRIPT};
pub use color::{tag_color, TagColor, LOW_FREQUENCY_MAX, PALETTE};
pub use corpus::Corpus;
pub use filter::{filter_items, visible_positions};
pub use render::{markdown_to_html, Renderer, SiteContext};
pub use state::FilterState;
pub use url::UrlBuilder;
pub use view::{CatalogOptions, CatalogView, ResultSummary, TagButton, Variant};
