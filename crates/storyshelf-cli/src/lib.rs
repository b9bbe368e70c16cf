//! Storyshelf CLI: configuration loading and the `storyshelf` commands.
//!
//! # Modules
//!
//! - [`app`]: Application struct, logging setup and command dispatch
//! - [`cli`]: Argument parsing with clap
//! - [`config`]: TOML/env configuration via confyg
//! - [`config_handlers`]: `config path|get|set|init|export`
//! - [`site_handlers`]: `build`, `search`, `tags`, `copy-assets`

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod site_handlers;

pub use app::StoryshelfCli;
pub use cli::{BaseCommand, CliArgs, ConfigAction, ConfigCommand};
pub use config::StoryshelfConfig;
pub use site_handlers::BuildReport;
