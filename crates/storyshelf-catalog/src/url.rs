//! Base-path aware URL building.
//!
//! A site may be deployed under a sub-path (`/storyshelf/`). Every link the
//! catalog emits goes through [`UrlBuilder`] so it lands under that base.

/// Builds site URLs under a deployment base.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlBuilder {
    /// Base without trailing slash; empty for root deployments.
    base: String,
}

impl UrlBuilder {
    /// Create a builder. A trailing slash on `base` is ignored, so `"/docs"`
    /// and `"/docs/"` behave the same. `""` and `"/"` mean the site root.
    pub fn new(base: impl AsRef<str>) -> Self {
        let base = base.as_ref().trim().trim_end_matches('/');
        let base = if base.is_empty() || base.starts_with('/') {
            base.to_string()
        } else {
            format!("/{base}")
        };
        Self { base }
    }

    /// The normalized base (no trailing slash).
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Place `path` under the base.
    ///
    /// Relative paths are treated as root-relative. A path already under the
    /// base is returned unchanged, so building twice is harmless.
    pub fn build(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        if self.is_under_base(&path) {
            return path;
        }
        format!("{}{}", self.base, path)
    }

    fn is_under_base(&self, path: &str) -> bool {
        if self.base.is_empty() {
            return true;
        }
        path.strip_prefix(&self.base)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    /// Navigation target for an item: `<collection>/<slug>` under the base.
    pub fn resolve_href(&self, collection_base: &str, slug: &str) -> String {
        self.build(&join_collection(collection_base, slug))
    }

    /// Location of an asset.
    ///
    /// Paths starting with `/` go straight to [`build`](Self::build);
    /// bare filenames are placed under the collection base first.
    pub fn resolve_asset(&self, collection_base: &str, filename_or_path: &str) -> String {
        if filename_or_path.starts_with('/') {
            return self.build(filename_or_path);
        }
        self.build(&join_collection(collection_base, filename_or_path))
    }
}

fn join_collection(collection_base: &str, rest: &str) -> String {
    let collection = collection_base.strip_suffix('/').unwrap_or(collection_base);
    if collection.is_empty() {
        format!("/{rest}")
    } else {
        format!("{collection}/{rest}")
    }
}
