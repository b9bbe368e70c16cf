//! Core traits for Storyshelf domain abstraction.
//!
//! [`ConfigProvider`] abstracts where a site keeps its content and where the
//! generated output goes. [`Searchable`] exposes the fields of a content item
//! that the fuzzy search index covers, so the search crate never needs to
//! know about the concrete story type.

use std::path::PathBuf;

use crate::Result;

/// Trait for site configuration.
///
/// The CLI implements this with its TOML-backed config; tests implement it
/// with a handful of fixed paths.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use storyshelf_core::traits::ConfigProvider;
/// use storyshelf_core::Result;
///
/// #[derive(Clone)]
/// struct BlogConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for BlogConfig {
///     fn project_name(&self) -> &str {
///         "blog"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn content_dir(&self) -> Result<PathBuf> {
///         Ok(self.root.join("content/stories"))
///     }
///
///     fn output_dir(&self) -> Result<PathBuf> {
///         Ok(self.root.join("dist"))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Directory holding the story markdown files, their code snippets and
    /// their images.
    fn content_dir(&self) -> Result<PathBuf>;

    /// Directory the generated site is written to.
    fn output_dir(&self) -> Result<PathBuf>;
}

/// Fields of a content item covered by fuzzy search.
///
/// Tags are matched one at a time; a match on any single tag counts as a
/// match on the tag field.
pub trait Searchable {
    /// Display title.
    fn title(&self) -> &str;

    /// Tags in their original order.
    fn tags(&self) -> &[String];

    /// Optional free-text description.
    fn description(&self) -> Option<&str>;
}
