//! Content sources.
//!
//! A [`ContentSource`] yields the full, validated story corpus together with
//! its tag frequency table. [`FsContentSource`] reads markdown files from a
//! directory tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use storyshelf_core::util::files::{exists, find_all_files, read_file, FindOptions};
use storyshelf_core::{Error, Result};

use crate::frontmatter::parse_story;
use crate::story::Story;
use crate::tags::{all_tags, TagCounts};

/// A loaded corpus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedContent {
    /// Stories, newest first (ties by slug).
    pub stories: Vec<Story>,
    /// Tag occurrence counts over `stories`.
    pub tag_counts: TagCounts,
}

impl LoadedContent {
    /// Build from stories, sorting them and computing tag counts.
    pub fn from_stories(mut stories: Vec<Story>) -> Self {
        stories.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.slug.cmp(&b.slug)));
        let tag_counts = TagCounts::from_stories(&stories);
        Self {
            stories,
            tag_counts,
        }
    }

    /// All distinct tags, alphabetically.
    pub fn all_tags(&self) -> Vec<String> {
        all_tags(&self.stories)
    }
}

/// Something that can produce the story corpus.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Load and validate every story.
    async fn load(&self) -> Result<LoadedContent>;
}

/// Loads stories from markdown files under a directory.
#[derive(Clone, Debug)]
pub struct FsContentSource {
    dir: PathBuf,
    strict: bool,
}

impl FsContentSource {
    /// Create a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            strict: false,
        }
    }

    /// Fail on the first invalid story instead of skipping it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The content directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Slug for a story file: its path relative to the content root, without
/// extension, `/`-separated.
pub fn slug_for(relative_path: &Path) -> String {
    relative_path
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn load(&self) -> Result<LoadedContent> {
        if !exists(&self.dir).await {
            return Err(Error::not_found(format!(
                "content directory {}",
                self.dir.display()
            )));
        }

        let files = find_all_files(&self.dir, FindOptions::markdown()).await?;
        let mut stories = Vec::with_capacity(files.len());
        let mut seen = HashSet::new();

        for file in files {
            let slug = slug_for(&file.relative_path);
            let parsed = match read_file(&file.path).await {
                Ok(content) => parse_story(&file.path, &slug, &content),
                Err(e) => Err(e),
            };

            match parsed {
                Ok(story) => {
                    if !seen.insert(story.slug.clone()) {
                        log::warn!("Duplicate story slug {:?} in {}", story.slug, file.path.display());
                    }
                    stories.push(story);
                }
                Err(e) if self.strict => return Err(e),
                Err(e) => log::warn!("Skipping story: {e}"),
            }
        }

        log::info!("Loaded {} stories from {}", stories.len(), self.dir.display());
        Ok(LoadedContent::from_stories(stories))
    }
}
