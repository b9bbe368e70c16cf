//! The story model.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use storyshelf_core::Searchable;

/// Icon used when the frontmatter does not set one.
pub const DEFAULT_ICON: &str = "📝";

/// Frontmatter schema of a story file.
///
/// Required: `title`, `tags`, `author`, `created`. Everything else is
/// optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryFrontmatter {
    /// Display title.
    pub title: String,
    /// Optional one-paragraph summary.
    #[serde(default)]
    pub description: Option<String>,
    /// Tags, in author order.
    pub tags: Vec<String>,
    /// Author names, in author order.
    pub author: Vec<String>,
    /// Creation date (`YYYY-MM-DD` or an RFC 3339 timestamp).
    #[serde(deserialize_with = "deserialize_created")]
    pub created: NaiveDate,
    /// Decorative icon.
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Code snippet files living next to the story.
    #[serde(default)]
    pub code_files: Vec<String>,
    /// Tile image path or filename.
    #[serde(default)]
    pub tile_image: Option<String>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

/// Parse the `created` field.
///
/// Accepts a plain date, an RFC 3339 timestamp, or a naive `T`/space
/// separated date-time. Only the date part is kept.
pub fn parse_created(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
}

fn deserialize_created<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid `created` date: {raw:?}")))
}

/// A loaded, validated story.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Display title.
    pub title: String,
    /// Unique identifier, used to build the story URL.
    pub slug: String,
    /// Tags, in author order. May be empty.
    pub tags: Vec<String>,
    /// Decorative icon.
    pub icon: String,
    /// Creation date.
    pub created: NaiveDate,
    /// Author names.
    pub author: Vec<String>,
    /// Optional summary; blank values are dropped.
    pub description: Option<String>,
    /// Optional tile image; blank values are dropped.
    pub tile_image: Option<String>,
    /// Code snippet files living next to the story.
    pub code_files: Vec<String>,
    /// Markdown body after the frontmatter.
    #[serde(skip)]
    pub body: String,
}

impl Story {
    /// Build a story from parsed frontmatter.
    pub fn from_frontmatter(slug: impl Into<String>, fm: StoryFrontmatter, body: impl Into<String>) -> Self {
        Self {
            title: fm.title,
            slug: slug.into(),
            tags: fm.tags,
            icon: fm.icon,
            created: fm.created,
            author: fm.author,
            description: non_blank(fm.description),
            tile_image: non_blank(fm.tile_image),
            code_files: fm.code_files,
            body: body.into(),
        }
    }

    /// Minimal story, mostly useful in tests and fixtures.
    pub fn new(title: impl Into<String>, slug: impl Into<String>, created: NaiveDate) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            tags: Vec::new(),
            icon: default_icon(),
            created,
            author: Vec::new(),
            description: None,
            tile_image: None,
            code_files: Vec::new(),
            body: String::new(),
        }
    }

    /// Builder-style: set tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style: set authors.
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.author = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style: set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(Some(description.into()));
        self
    }

    /// Builder-style: set the tile image.
    pub fn with_tile_image(mut self, tile_image: impl Into<String>) -> Self {
        self.tile_image = non_blank(Some(tile_image.into()));
        self
    }

    /// Whether the story carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Searchable for Story {
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

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
