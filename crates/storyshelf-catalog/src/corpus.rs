//! The immutable story corpus.

use std::sync::Arc;

use storyshelf_content::{LoadedContent, Story, TagCounts};
use storyshelf_search::CorpusVersion;

/// A fixed set of stories plus the tag data the catalog needs.
///
/// Each `Corpus` gets a fresh [`CorpusVersion`] at construction. Clones share
/// the stories and the version, so they hit the same cached index.
#[derive(Clone, Debug)]
pub struct Corpus {
    stories: Arc<[Story]>,
    tag_counts: Arc<TagCounts>,
    all_tags: Arc<[String]>,
    version: CorpusVersion,
}

impl Corpus {
    /// Create a corpus from its parts.
    ///
    /// `all_tags` is the tag list shown in the filter controls, in the order
    /// the content source supplies it.
    pub fn new(stories: Vec<Story>, tag_counts: TagCounts, all_tags: Vec<String>) -> Self {
        Self {
            stories: stories.into(),
            tag_counts: Arc::new(tag_counts),
            all_tags: all_tags.into(),
            version: CorpusVersion::next(),
        }
    }

    /// Create a corpus from stories alone, deriving counts and the
    /// alphabetical tag list.
    pub fn from_stories(stories: Vec<Story>) -> Self {
        let tag_counts = TagCounts::from_stories(&stories);
        let all_tags = storyshelf_content::all_tags(&stories);
        Self::new(stories, tag_counts, all_tags)
    }

    /// The stories, in corpus order.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// Tag occurrence counts.
    pub fn tag_counts(&self) -> &TagCounts {
        &self.tag_counts
    }

    /// Tags offered in the filter controls.
    pub fn all_tags(&self) -> &[String] {
        &self.all_tags
    }

    /// Identity token of this corpus.
    pub fn version(&self) -> CorpusVersion {
        self.version
    }

    /// Number of stories.
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Whether there are no stories.
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Whether `tag` appears in the tag list.
    pub fn knows_tag(&self, tag: &str) -> bool {
        self.all_tags.iter().any(|t| t == tag)
    }
}

impl From<LoadedContent> for Corpus {
    fn from(loaded: LoadedContent) -> Self {
        let all_tags = loaded.all_tags();
        Self::new(loaded.stories, loaded.tag_counts, all_tags)
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::from_stories(Vec::new())
    }
}
