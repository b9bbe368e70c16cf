//! Frontmatter extraction and parsing.
//!
//! A story file starts with a YAML block fenced by `---` lines, followed by
//! the markdown body.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use storyshelf_core::{Error, Result};

use crate::story::{Story, StoryFrontmatter};

static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\x{feff}?---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)")
        .expect("frontmatter regex is valid")
});

/// Split a document into its YAML frontmatter and body.
///
/// Returns `None` if the document does not open with a fenced block.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let caps = FRONTMATTER_RE.captures(content)?;
    let whole = caps.get(0)?;
    let yaml = caps.get(1)?.as_str();
    Some((yaml, &content[whole.end()..]))
}

/// Parse a story document.
///
/// `path` is only used for error messages.
pub fn parse_story(path: &Path, slug: &str, content: &str) -> Result<Story> {
    let (yaml, body) = split_frontmatter(content)
        .ok_or_else(|| Error::frontmatter(path, "missing `---` frontmatter block"))?;

    let fm: StoryFrontmatter =
        yaml_serde::from_str(yaml).map_err(|e| Error::frontmatter(path, e.to_string()))?;

    if fm.title.trim().is_empty() {
        return Err(Error::frontmatter(path, "`title` must not be empty"));
    }

    Ok(Story::from_frontmatter(slug, fm, body.trim_start_matches(['\r', '\n'])))
}
