//! Site configuration.
//!
//! [`StoryshelfConfig`] is loaded from a TOML file, overlaid with
//! `STORYSHELF_*` environment variables, and falls back to built-in
//! defaults, using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `STORYSHELF_CONFIG` environment variable
//! 3. XDG default: `~/.config/storyshelf/config.toml`
//! 4. Built-in defaults
//!
//! Environment keys are `STORYSHELF_<SECTION>_<FIELD>`, for example
//! `STORYSHELF_CATALOG_VARIANT=technical`.

use std::path::PathBuf;

use confyg::{env, Confygery};
use serde::{Deserialize, Deserializer, Serialize};
use storyshelf_catalog::{CatalogOptions, Variant};
use storyshelf_core::traits::ConfigProvider;
use storyshelf_core::{Error, Result};
use storyshelf_search::SearchConfig;

/// Environment variable prefix and XDG directory name.
pub const ENV_PREFIX: &str = "STORYSHELF";

// ============================================================================
// Configuration structs
// ============================================================================

/// Top-level site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryshelfConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Root that relative content and output paths hang off. Defaults to the
    /// working directory.
    pub base_path: Option<String>,

    pub content: ContentConfig,
    pub site: SiteConfig,
    pub catalog: CatalogConfig,
    pub search: SearchSettings,
}

/// Where stories come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Story directory. Defaults to `<base_path>/content/stories`.
    pub path: Option<String>,

    /// Fail the load on the first invalid story instead of skipping it.
    #[serde(deserialize_with = "lenient_bool")]
    pub strict: bool,
}

/// Site-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title shown in every page's `<title>`.
    pub title: String,

    /// Deployment base, e.g. `/` or `/shelf/`.
    pub base_url: String,

    /// Output directory. Defaults to `<base_path>/dist`.
    pub output_dir: Option<String>,
}

/// Catalog presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Collection path stories are published under.
    pub base_path: String,

    /// Card style.
    pub variant: Variant,

    /// Tile image for technical cards whose story has none.
    pub default_tile_image: Option<String>,
}

/// Fuzzy search tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Match looseness in `[0.0, 1.0]`.
    #[serde(deserialize_with = "lenient_f64")]
    pub threshold: f64,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for StoryshelfConfig {
    fn default() -> Self {
        Self {
            project_name: "storyshelf".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            site: SiteConfig::default(),
            catalog: CatalogConfig::default(),
            search: SearchSettings::default(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Storyshelf".to_string(),
            base_url: "/".to_string(),
            output_dir: None,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let options = CatalogOptions::default();
        Self {
            base_path: options.base_path,
            variant: options.variant,
            default_tile_image: options.default_tile_image,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            threshold: SearchConfig::default().threshold,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl StoryshelfConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            log::debug!("Loading config from {}", path.display());
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        for section in ["content", "site", "catalog", "search"] {
            env_opts.add_section(section);
        }
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(format!("{ENV_PREFIX}_CONFIG")) {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// `~/.config/storyshelf/config.toml`, if a config dir exists.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("storyshelf").join("config.toml"))
    }

    /// Reject values the catalog cannot work with.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.search.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::config(format!(
                "search.threshold must be within 0.0..=1.0, got {threshold}"
            )));
        }
        if self.site.title.trim().is_empty() {
            return Err(Error::config("site.title must not be empty"));
        }
        Ok(())
    }

    /// Catalog options derived from the `site`, `catalog` and `search` sections.
    pub fn catalog_options(&self) -> CatalogOptions {
        CatalogOptions {
            site_base: self.site.base_url.clone(),
            base_path: self.catalog.base_path.clone(),
            variant: self.catalog.variant,
            default_tile_image: self.catalog.default_tile_image.clone(),
            search: SearchConfig {
                threshold: self.search.threshold,
            },
        }
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into `STORYSHELF_*` environment variable pairs.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for StoryshelfConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(PathBuf::from(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_dir(&self) -> Result<PathBuf> {
        match &self.content.path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Ok(self.base_path()?.join("content").join("stories")),
        }
    }

    fn output_dir(&self) -> Result<PathBuf> {
        match &self.site.output_dir {
            Some(p) => Ok(PathBuf::from(p)),
            None => Ok(self.base_path()?.join("dist")),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Environment overrides arrive as strings; files carry native booleans.
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => Ok(b),
        Raw::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, got {other:?}"
            ))),
        },
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Float(f64),
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Float(f) => Ok(f),
        Raw::Int(i) => Ok(i as f64),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                flatten_toml_value(val, &format!("{prefix}_{}", key.to_uppercase()), out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
