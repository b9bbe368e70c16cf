//! Handlers for the site commands: `build`, `search`, `tags`, `copy-assets`.
//!
//! Output layout under the output directory, for the default
//! `catalog.base_path = "/stories"`:
//!
//! ```text
//! index.html                  catalog
//! stories/index.html          catalog
//! stories/<slug>/index.html   one page per story
//! stories/<image>             images copied from the content directory
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use storyshelf_catalog::{
    CatalogOptions, CatalogView, Corpus, Renderer, ResultSummary, SiteContext, TagChip, Variant,
};
use storyshelf_content::{copy_images, load_code_files, ContentSource, FsContentSource};
use storyshelf_core::traits::ConfigProvider;
use storyshelf_core::util::files::write_file;
use storyshelf_core::util::paths::resolve_within;
use storyshelf_core::{Error, Result};

use crate::config::StoryshelfConfig;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

// ============================================================================
// Loading
// ============================================================================

/// Load every story under the configured content directory.
pub async fn load_corpus(config: &StoryshelfConfig) -> Result<Corpus> {
    let source = FsContentSource::new(config.content_dir()?).strict(config.content.strict);
    let loaded = source.load().await?;
    Ok(Corpus::from(loaded))
}

/// Directory the collection is written to: `output` plus `base_path`.
pub fn collection_dir(output: &Path, base_path: &str) -> PathBuf {
    let relative = base_path.trim_matches('/');
    if relative.is_empty() {
        output.to_path_buf()
    } else {
        output.join(relative)
    }
}

// ============================================================================
// build
// ============================================================================

/// What a site build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// HTML pages written, catalog copies included.
    pub pages: usize,
    pub stories: usize,
    pub images: Vec<String>,
}

/// Render the whole site.
pub async fn build_site(
    config: &StoryshelfConfig,
    output: Option<&str>,
    variant: Option<Variant>,
) -> Result<BuildReport> {
    let mut options = config.catalog_options();
    if let Some(variant) = variant {
        options.variant = variant;
    }
    let output_dir = match output {
        Some(p) => PathBuf::from(p),
        None => config.output_dir()?,
    };
    let content_dir = config.content_dir()?;

    let view = CatalogView::new(load_corpus(config).await?, options);
    let renderer = Renderer::new()?;
    let site = SiteContext::for_view(&config.site.title, &view);
    let collection = collection_dir(&output_dir, &view.options().base_path);

    let catalog = renderer.render_catalog(&view, &site)?;
    write_file(&output_dir.join("index.html"), &catalog).await?;
    let mut pages = 1;
    if collection != output_dir {
        write_file(&collection.join("index.html"), &catalog).await?;
        pages += 1;
    }

    let stories = view.corpus().stories();
    for story in stories {
        let page_dir = resolve_within(&collection, &story.slug).ok_or_else(|| {
            Error::invalid_data(format!("story slug {:?} escapes the output directory", story.slug))
        })?;
        let code_files = load_code_files(&story.code_files, &content_dir).await;
        let html = renderer.render_story(story, &code_files, &view, &site)?;
        write_file(&page_dir.join("index.html"), html).await?;
        log::debug!("Rendered {}", story.slug);
        pages += 1;
    }

    let images = copy_images(&content_dir, &collection).await?;

    Ok(BuildReport {
        output_dir,
        pages,
        stories: stories.len(),
        images,
    })
}

pub async fn handle_build(
    config: &StoryshelfConfig,
    output: Option<&str>,
    variant: Option<Variant>,
    out: &mut impl Write,
) -> Result<()> {
    let report = build_site(config, output, variant).await?;
    writeln!(out, "Site built:").map_err(Error::io)?;
    writeln!(out, "  Stories: {}", report.stories).map_err(Error::io)?;
    writeln!(out, "  Pages:   {}", report.pages).map_err(Error::io)?;
    writeln!(out, "  Images:  {}", report.images.len()).map_err(Error::io)?;
    writeln!(out, "\nOutput written to: {}", report.output_dir.display()).map_err(Error::io)?;
    Ok(())
}

// ============================================================================
// search
// ============================================================================

/// A catalog view with `tags` selected and `query` applied.
pub fn filtered_view(
    corpus: Corpus,
    options: CatalogOptions,
    tags: &[String],
    query: Option<&str>,
) -> CatalogView {
    let mut view = CatalogView::new(corpus, options);
    for tag in tags {
        if !view.state().is_selected(tag) {
            view.toggle_tag(tag);
        }
    }
    if let Some(query) = query {
        view.set_query(query);
    }
    view
}

/// Closest known tag to `tag`, if any is similar enough.
pub fn suggest_tag<'a>(tag: &str, known: &'a [String]) -> Option<&'a str> {
    known
        .iter()
        .map(|k| (k.as_str(), strsim::jaro_winkler(tag, k)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(k, _)| k)
}

#[derive(Debug, Serialize)]
struct SearchItem<'a> {
    slug: &'a str,
    title: &'a str,
    href: String,
    created: String,
    tags: &'a [String],
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    summary: ResultSummary,
    items: Vec<SearchItem<'a>>,
}

/// Plain-text listing of the visible stories.
pub fn format_search_text(view: &CatalogView) -> String {
    let mut text = format!("{}\n", view.result_summary());
    for (story, card) in view.visible_items().iter().zip(view.cards()) {
        text.push_str(&format!("\n{} {}\n", card.icon, card.title));
        text.push_str(&format!("  {}  {}", card.href, card.date));
        if !story.tags.is_empty() {
            text.push_str(&format!("  [{}]", story.tags.join(", ")));
        }
        text.push('\n');
    }
    text
}

/// JSON listing of the visible stories with the result summary.
pub fn format_search_json(view: &CatalogView) -> Result<String> {
    let visible = view.visible_items();
    let cards = view.cards();
    let items = visible
        .iter()
        .zip(cards)
        .map(|(story, card)| SearchItem {
            slug: &story.slug,
            title: &story.title,
            href: card.href,
            created: card.datetime,
            tags: &story.tags,
            description: story.description.as_deref(),
        })
        .collect();
    let output = SearchOutput {
        summary: view.result_summary(),
        items,
    };
    serde_json::to_string_pretty(&output).map_err(|e| Error::serialization(e.to_string()))
}

pub async fn handle_search(
    config: &StoryshelfConfig,
    tags: &[String],
    query: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let corpus = load_corpus(config).await?;
    for tag in tags.iter().filter(|t| !corpus.knows_tag(t)) {
        match suggest_tag(tag, corpus.all_tags()) {
            Some(hint) => tracing::warn!("Unknown tag '{tag}'; did you mean '{hint}'?"),
            None => tracing::warn!("Unknown tag '{tag}'"),
        }
    }

    let view = filtered_view(corpus, config.catalog_options(), tags, query);
    let rendered = if json {
        format_search_json(&view)?
    } else {
        format_search_text(&view)
    };
    writeln!(out, "{}", rendered.trim_end()).map_err(Error::io)
}

// ============================================================================
// tags
// ============================================================================

/// Filter-list entries, most frequent first.
pub fn tag_chips(corpus: Corpus, options: CatalogOptions) -> Vec<TagChip> {
    CatalogView::new(corpus, options)
        .sorted_tags()
        .into_iter()
        .map(|button| button.chip)
        .collect()
}

pub fn format_tags_text(chips: &[TagChip]) -> String {
    let width = chips.iter().map(|c| c.name.chars().count()).max().unwrap_or(0);
    chips
        .iter()
        .map(|c| format!("{:>4}  {:<width$}  {}\n", c.count, c.name, c.color))
        .collect()
}

pub async fn handle_tags(config: &StoryshelfConfig, json: bool, out: &mut impl Write) -> Result<()> {
    let chips = tag_chips(load_corpus(config).await?, config.catalog_options());
    if json {
        let rendered =
            serde_json::to_string_pretty(&chips).map_err(|e| Error::serialization(e.to_string()))?;
        writeln!(out, "{rendered}").map_err(Error::io)
    } else if chips.is_empty() {
        writeln!(out, "No tags.").map_err(Error::io)
    } else {
        write!(out, "{}", format_tags_text(&chips)).map_err(Error::io)
    }
}

// ============================================================================
// copy-assets
// ============================================================================

pub async fn handle_copy_assets(config: &StoryshelfConfig, out: &mut impl Write) -> Result<()> {
    let collection = collection_dir(&config.output_dir()?, &config.catalog.base_path);
    let copied = copy_images(&config.content_dir()?, &collection).await?;
    for name in &copied {
        writeln!(out, "  {name}").map_err(Error::io)?;
    }
    writeln!(
        out,
        "Copied {} image(s) to {}",
        copied.len(),
        collection.display()
    )
    .map_err(Error::io)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storyshelf_catalog::TagColor;
    use tempfile::TempDir;

    const REFACTOR: &str = "---
title: Refactor with Claude
description: Pairing on a legacy module
tags: [ai, refactor]
author: [Ada]
created: 2024-01-05
codeFiles: [snippet.rs]
---

Some *markdown* body.
";

    const REBASE: &str = "---
title: Rebase tutorial
tags: [git]
author: [Linus]
created: 2024-02-01
---

Interactive rebase, step by step.
";

    fn site(dir: &TempDir) -> StoryshelfConfig {
        let content = dir.path().join("content").join("stories");
        std::fs::create_dir_all(&content).unwrap();
        std::fs::write(content.join("refactor-with-claude.md"), REFACTOR).unwrap();
        std::fs::write(content.join("rebase-tutorial.md"), REBASE).unwrap();
        std::fs::write(content.join("snippet.rs"), "fn main() {}\n").unwrap();
        std::fs::write(content.join("cover.png"), [0x89, b'P', b'N', b'G']).unwrap();

        StoryshelfConfig {
            base_path: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        }
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_collection_dir() {
        let out = Path::new("/out");
        assert_eq!(collection_dir(out, "/stories"), PathBuf::from("/out/stories"));
        assert_eq!(collection_dir(out, "/ai/stories/"), PathBuf::from("/out/ai/stories"));
        assert_eq!(collection_dir(out, "/"), PathBuf::from("/out"));
    }

    #[test]
    fn test_suggest_tag() {
        let known: Vec<String> = ["ai", "git", "refactor"].map(String::from).to_vec();
        assert_eq!(suggest_tag("refactr", &known), Some("refactor"));
        assert_eq!(suggest_tag("kubernetes", &known), None);
    }

    // ------------------------------------------------------------------------
    // build
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_build_site_layout() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);

        let report = build_site(&config, None, None).await.unwrap();
        let dist = dir.path().join("dist");
        assert_eq!(report.output_dir, dist);
        assert_eq!(report.stories, 2);
        assert_eq!(report.pages, 4);
        assert_eq!(report.images, vec!["cover.png".to_string()]);

        let catalog = std::fs::read_to_string(dist.join("index.html")).unwrap();
        assert!(catalog.contains("Showing 2 of 2 items"));
        assert!(catalog.contains(r#"<script type="application/json" id="catalog-data">"#));
        assert!(catalog.contains("<script>"));
        assert!(catalog.contains(r#"data-pos="0""#));
        assert!(catalog.contains(r#"data-pos="1""#));
        assert!(dist.join("stories").join("index.html").exists());
        assert!(dist.join("stories").join("cover.png").exists());

        let story =
            std::fs::read_to_string(dist.join("stories/refactor-with-claude/index.html")).unwrap();
        assert!(story.contains("<em>markdown</em>"));
        assert!(story.contains(r#"class="language-rust""#));
        assert!(dist.join("stories/rebase-tutorial/index.html").exists());
    }

    #[tokio::test]
    async fn test_build_site_output_and_variant_overrides() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        let target = dir.path().join("public");

        let mut out = Vec::new();
        handle_build(
            &config,
            Some(target.to_str().unwrap()),
            Some(Variant::Technical),
            &mut out,
        )
        .await
        .unwrap();

        let catalog = std::fs::read_to_string(target.join("index.html")).unwrap();
        assert!(catalog.contains(r#"class="card card-technical""#));
        assert!(!dir.path().join("dist").exists());
        assert!(output(out).contains("Pages:   4"));
    }

    #[tokio::test]
    async fn test_build_site_missing_content_dir() {
        let dir = TempDir::new().unwrap();
        let config = StoryshelfConfig {
            base_path: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        let err = build_site(&config, None, None).await.unwrap_err();
        assert!(err.is_not_found());
    }

    // ------------------------------------------------------------------------
    // search
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_search_by_tag_text() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);

        let mut out = Vec::new();
        handle_search(&config, &["git".to_string()], None, false, &mut out)
            .await
            .unwrap();
        let text = output(out);
        assert!(text.starts_with("Showing 1 of 2 items"));
        assert!(text.contains("Rebase tutorial"));
        assert!(text.contains("/stories/rebase-tutorial"));
        assert!(!text.contains("Refactor with Claude"));
    }

    #[tokio::test]
    async fn test_search_by_query_json() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);

        let mut out = Vec::new();
        handle_search(&config, &[], Some("rebase"), true, &mut out)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["summary"]["visible"], 1);
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["items"][0]["slug"], "rebase-tutorial");
        assert_eq!(value["items"][0]["created"], "2024-02-01");
    }

    #[tokio::test]
    async fn test_search_tag_and_query_can_be_empty() {
        let dir = TempDir::new().unwrap();
        let corpus = load_corpus(&site(&dir)).await.unwrap();
        let view = filtered_view(
            corpus,
            CatalogOptions::default(),
            &["ai".to_string()],
            Some("rebase"),
        );
        assert!(view.is_empty_result());
        assert_eq!(format_search_text(&view), "Showing 0 of 2 items\n");
    }

    #[test]
    fn test_filtered_view_ignores_repeated_tags() {
        let view = filtered_view(
            Corpus::default(),
            CatalogOptions::default(),
            &["git".to_string(), "git".to_string()],
            None,
        );
        assert!(view.state().is_selected("git"));
    }

    // ------------------------------------------------------------------------
    // tags / copy-assets
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_tags_listing() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);

        let chips = tag_chips(load_corpus(&config).await.unwrap(), config.catalog_options());
        let names: Vec<&str> = chips.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ai", "git", "refactor"]);
        assert!(chips.iter().all(|c| c.count == 1 && c.color == TagColor::Grey));

        let text = format_tags_text(&chips);
        assert_eq!(text.lines().next(), Some("   1  ai        grey"));

        let mut out = Vec::new();
        handle_tags(&config, true, &mut out).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert_eq!(value[0]["name"], "ai");
    }

    #[tokio::test]
    async fn test_copy_assets() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);

        let mut out = Vec::new();
        handle_copy_assets(&config, &mut out).await.unwrap();
        assert!(dir.path().join("dist/stories/cover.png").exists());
        assert!(output(out).contains("Copied 1 image(s)"));
    }
}
