//! Card view models.
//!
//! A [`Card`] is everything a template needs to draw one story in the grid,
//! already resolved: link target, formatted date, capped tag chips, tile
//! image, and the playful rotation.

use chrono::NaiveDate;
use serde::Serialize;
use storyshelf_content::{Story, TagCounts};

use crate::color::{tag_color, TagColor};
use crate::url::UrlBuilder;
use crate::view::{CatalogOptions, Variant};

/// Maximum number of tag chips on a card.
pub const CARD_TAG_LIMIT: usize = 3;

/// Rotation cycle for playful cards, indexed by grid position.
pub const ROTATIONS: [&str; 6] = [
    "rotate(-2deg)",
    "rotate(1deg)",
    "rotate(-1deg)",
    "rotate(2deg)",
    "rotate(-0.5deg)",
    "rotate(1.5deg)",
];

/// A tag as displayed on a card or in the filter list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagChip {
    pub name: String,
    pub count: usize,
    pub color: TagColor,
    pub class: &'static str,
}

impl TagChip {
    /// Chip for `tag`, colored by its corpus count.
    pub fn new(tag: &str, counts: &TagCounts) -> Self {
        let count = counts.get(tag);
        let color = tag_color(tag, Some(count));
        Self {
            name: tag.to_string(),
            count,
            color,
            class: color.class(),
        }
    }
}

/// One story, ready to render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    pub title: String,
    pub slug: String,
    pub href: String,
    pub icon: String,
    pub description: Option<String>,
    /// At most [`CARD_TAG_LIMIT`] chips, most frequent first.
    pub tags: Vec<TagChip>,
    /// Number of tags not shown; `None` when all fit.
    pub overflow: Option<usize>,
    /// Authors joined with `", "`.
    pub authors: String,
    /// Display date, e.g. `Jan 5, 2024`.
    pub date: String,
    /// ISO date for the `datetime` attribute.
    pub datetime: String,
    /// Tile image location (technical variant only).
    pub tile_src: Option<String>,
    /// CSS transform (playful variant only).
    pub rotation: Option<&'static str>,
}

impl Card {
    /// Build the card for `story` at grid `position`.
    pub fn build(
        story: &Story,
        position: usize,
        counts: &TagCounts,
        urls: &UrlBuilder,
        options: &CatalogOptions,
    ) -> Self {
        let (tags, overflow) = top_tags(&story.tags, counts);

        let (tile_src, rotation) = match options.variant {
            Variant::Technical => {
                let tile = story
                    .tile_image
                    .as_deref()
                    .or(options.default_tile_image.as_deref());
                (tile.map(|t| urls.resolve_asset(&options.base_path, t)), None)
            }
            Variant::Playful => (None, Some(ROTATIONS[position % ROTATIONS.len()])),
        };

        Self {
            title: story.title.clone(),
            slug: story.slug.clone(),
            href: urls.resolve_href(&options.base_path, &story.slug),
            icon: story.icon.clone(),
            description: story.description.clone(),
            tags,
            overflow,
            authors: story.author.join(", "),
            date: format_date(story.created),
            datetime: story.created.format("%Y-%m-%d").to_string(),
            tile_src,
            rotation,
        }
    }
}

/// A card in the full grid, shown or hidden by the current filters.
///
/// The catalog page renders every story so the in-page script can narrow
/// the grid without a reload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridCard {
    #[serde(flatten)]
    pub card: Card,
    /// Corpus position.
    pub position: usize,
    pub visible: bool,
}

/// Sort `tags` by descending frequency (stable), keep the first
/// [`CARD_TAG_LIMIT`], and report how many were left out.
pub fn top_tags(tags: &[String], counts: &TagCounts) -> (Vec<TagChip>, Option<usize>) {
    let chips = counts
        .sort_by_frequency(tags)
        .iter()
        .take(CARD_TAG_LIMIT)
        .map(|tag| TagChip::new(tag, counts))
        .collect();
    let overflow = (tags.len() > CARD_TAG_LIMIT).then(|| tags.len() - CARD_TAG_LIMIT);
    (chips, overflow)
}

/// `Jan 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> TagCounts {
        [("ai", 5), ("refactor", 2), ("git", 1)].into_iter().collect()
    }

    fn story() -> Story {
        Story::new(
            "Refactor with Claude",
            "refactor",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .with_tags(["refactor", "ai"])
        .with_authors(["Ada", "Linus"])
    }

    fn names(chips: &[TagChip]) -> Vec<&str> {
        chips.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()), "Jan 5, 2024");
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2023, 12, 25).unwrap()), "Dec 25, 2023");
    }

    #[test]
    fn test_top_tags_sort_then_slice() {
        let counts: TagCounts = [("a", 1), ("b", 9), ("c", 1), ("d", 4), ("e", 1), ("f", 1), ("g", 9)]
            .into_iter()
            .collect();
        let tags: Vec<String> = ["a", "b", "c", "d", "e", "f", "g"].map(String::from).to_vec();
        let (chips, overflow) = top_tags(&tags, &counts);
        assert_eq!(names(&chips), vec!["b", "g", "d"]);
        assert_eq!(overflow, Some(4));
    }

    #[test]
    fn test_top_tags_ties_keep_order() {
        let counts = TagCounts::new();
        let tags: Vec<String> = ["x", "y", "z", "w"].map(String::from).to_vec();
        let (chips, overflow) = top_tags(&tags, &counts);
        assert_eq!(names(&chips), vec!["x", "y", "z"]);
        assert_eq!(overflow, Some(1));
    }

    #[test]
    fn test_top_tags_no_overflow() {
        let tags: Vec<String> = ["git"].map(String::from).to_vec();
        let (chips, overflow) = top_tags(&tags, &counts());
        assert_eq!(chips.len(), 1);
        assert_eq!(overflow, None);
        assert_eq!(top_tags(&[], &counts()), (Vec::new(), None));
    }

    #[test]
    fn test_chip_colors() {
        let chip = TagChip::new("ai", &counts());
        assert_eq!(chip.count, 5);
        assert_eq!(chip.color, TagColor::Blue);
        assert_eq!(TagChip::new("git", &counts()).color, TagColor::Grey);
    }

    #[test]
    fn test_playful_card() {
        let options = CatalogOptions {
            base_path: "/stories".into(),
            ..CatalogOptions::default()
        };
        let card = Card::build(&story(), 7, &counts(), &UrlBuilder::new("/shelf/"), &options);
        assert_eq!(card.href, "/shelf/stories/refactor");
        assert_eq!(names(&card.tags), vec!["ai", "refactor"]);
        assert_eq!(card.authors, "Ada, Linus");
        assert_eq!(card.date, "Jan 5, 2024");
        assert_eq!(card.datetime, "2024-01-05");
        assert_eq!(card.rotation, Some("rotate(1deg)"));
        assert!(card.tile_src.is_none());
    }

    #[test]
    fn test_technical_card_tile_fallback() {
        let options = CatalogOptions {
            base_path: "/stories".into(),
            variant: Variant::Technical,
            default_tile_image: Some("/images/default-tile.svg".into()),
            ..CatalogOptions::default()
        };
        let urls = UrlBuilder::new("/");

        let card = Card::build(&story(), 0, &counts(), &urls, &options);
        assert_eq!(card.tile_src.as_deref(), Some("/images/default-tile.svg"));
        assert!(card.rotation.is_none());

        let with_tile = story().with_tile_image("refactor.png");
        let card = Card::build(&with_tile, 0, &counts(), &urls, &options);
        assert_eq!(card.tile_src.as_deref(), Some("/stories/refactor.png"));
    }

    #[test]
    fn test_technical_card_without_any_tile() {
        let options = CatalogOptions {
            variant: Variant::Technical,
            ..CatalogOptions::default()
        };
        let card = Card::build(&story(), 0, &counts(), &UrlBuilder::default(), &options);
        assert!(card.tile_src.is_none());
    }
}
