//! HTML rendering of the catalog and story pages.
//!
//! Templates are compiled into the binary and rendered with minijinja.
//! Their names end in `.html`, so values are HTML-escaped unless marked
//! `safe` (only the markdown body is). The escaper also encodes `/`, which
//! browsers decode in attribute values.

use minijinja::{context, Environment, Value};
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;
use storyshelf_content::{CodeFile, Story};
use storyshelf_core::{Error, Result};

use crate::card::{format_date, TagChip};
use crate::client::{ClientData, FILTER_SCRIPT};
use crate::view::CatalogView;

const LAYOUT_TEMPLATE: &str = include_str!("../templates/layout.html");
const CATALOG_TEMPLATE: &str = include_str!("../templates/catalog.html");
const STORY_TEMPLATE: &str = include_str!("../templates/story.html");

/// Site-wide values shared by every page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteContext {
    /// Page title prefix.
    pub title: String,
    /// Link to the site home page.
    pub home: String,
}

impl SiteContext {
    /// Site context with the home link resolved through `view`'s URL builder.
    pub fn for_view(title: impl Into<String>, view: &CatalogView) -> Self {
        Self {
            title: title.into(),
            home: view.urls().build("/"),
        }
    }
}

/// Page renderer.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Create a renderer with the built-in templates.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in [
            ("layout.html", LAYOUT_TEMPLATE),
            ("catalog.html", CATALOG_TEMPLATE),
            ("story.html", STORY_TEMPLATE),
        ] {
            env.add_template(name, source)
                .map_err(|e| Error::render(format!("failed to add template {name}: {e}")))?;
        }
        Ok(Self { env })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| Error::render(e.to_string()))?;
        template
            .render(ctx)
            .map_err(|e| Error::render(format!("{name}: {e}")))
    }

    /// Render the catalog page for the view's current state.
    ///
    /// Every story gets a card; those outside the current filters are
    /// `hidden`. The page embeds [`ClientData`] and a script that keeps
    /// filtering in the browser.
    pub fn render_catalog(&self, view: &CatalogView, site: &SiteContext) -> Result<String> {
        let catalog_href = view.urls().build(&view.options().base_path);
        let catalog_data = ClientData::from_view(view).to_script_json()?;
        self.render(
            "catalog.html",
            context! {
                site,
                query => view.state().query(),
                tags => view.sorted_tags(),
                tag_panel_open => view.is_tag_panel_open(),
                has_active_filters => view.has_active_filters(),
                summary => view.result_summary().to_string(),
                cards => view.grid_cards(),
                is_empty => view.is_empty_result(),
                variant => view.options().variant.as_str(),
                catalog_href,
                catalog_data => Value::from_safe_string(catalog_data),
                filter_script => Value::from_safe_string(FILTER_SCRIPT.to_string()),
            },
        )
    }

    /// Render a story page.
    ///
    /// Tag colors come from the view's corpus; links go through its URL
    /// builder.
    pub fn render_story(
        &self,
        story: &Story,
        code_files: &[CodeFile],
        view: &CatalogView,
        site: &SiteContext,
    ) -> Result<String> {
        let counts = view.corpus().tag_counts();
        let tags: Vec<TagChip> = story.tags.iter().map(|t| TagChip::new(t, counts)).collect();
        let back_href = view.urls().build(&view.options().base_path);

        self.render(
            "story.html",
            context! {
                site,
                story,
                tags,
                code_files,
                authors => story.author.join(", "),
                date => format_date(story.created),
                datetime => story.created.format("%Y-%m-%d").to_string(),
                body => markdown_to_html(&story.body),
                back_href,
            },
        )
    }
}

/// Convert markdown to HTML.
///
/// Fenced code blocks get a `language-<info>` class on their `<code>` tag.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
