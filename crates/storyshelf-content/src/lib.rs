//! Story loading, frontmatter validation, and content utilities.
//!
//! # Modules
//!
//! - [`story`]: the `Story` model and its frontmatter schema
//! - [`frontmatter`]: splitting and parsing the YAML header
//! - [`loader`]: the `ContentSource` trait and its filesystem implementation
//! - [`tags`]: tag frequency table and tag helpers
//! - [`code`]: code snippets attached to a story, with language detection
//! - [`assets`]: copying content images into the public output

#![doc = include_str!("../README.md")]

pub mod assets;
pub mod code;
pub mod frontmatter;
pub mod loader;
pub mod story;
pub mod tags;

pub use assets::{copy_images, IMAGE_EXTENSIONS};
pub use code::{language_for_extension, load_code_files, CodeFile};
pub use frontmatter::{parse_story, split_frontmatter};
pub use loader::{slug_for, ContentSource, FsContentSource, LoadedContent};
pub use story::{Story, StoryFrontmatter, DEFAULT_ICON};
pub use tags::{all_tags, stories_with_tag, TagCounts};
