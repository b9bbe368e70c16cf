//! Storyshelf application: logging setup and command dispatch.

use std::io::Write;

use storyshelf_core::{Error, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::{BaseCommand, CliArgs};
use crate::config::StoryshelfConfig;
use crate::{config_handlers, site_handlers};

// ============================================================================
// StoryshelfCli
// ============================================================================

/// The `storyshelf` command-line application.
pub struct StoryshelfCli {
    name: String,
    config: StoryshelfConfig,
    version: String,
}

impl StoryshelfCli {
    /// Create from CLI args, loading config from file and environment.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = StoryshelfConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    pub fn new(name: impl Into<String>, config: StoryshelfConfig) -> Self {
        Self {
            name: name.into(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn config(&self) -> &StoryshelfConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// `RUST_LOG` wins when set; otherwise `--quiet` means warn, `--verbose`
    /// means debug, and the default is info. Records from the library
    /// crates' `log` macros are forwarded to the same subscriber.
    ///
    /// Returns `false` if a subscriber was already installed.
    pub fn init_logging(&self, verbose: bool, quiet: bool) -> bool {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        match tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Keeping the installed log subscriber: {e}");
                false
            }
        }
    }

    /// Run the CLI with the given arguments, writing to stdout.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with(args, &mut out).await
    }

    /// Run the CLI with the given arguments, writing to `out`.
    pub async fn run_with(&self, args: CliArgs, out: &mut impl Write) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(BaseCommand::Build { output, variant }) => {
                site_handlers::handle_build(&self.config, output.as_deref(), variant, out).await
            }
            Some(BaseCommand::Search { tags, query, json }) => {
                site_handlers::handle_search(&self.config, &tags, query.as_deref(), json, out)
                    .await
            }
            Some(BaseCommand::Tags { json }) => {
                site_handlers::handle_tags(&self.config, json, out).await
            }
            Some(BaseCommand::CopyAssets) => {
                site_handlers::handle_copy_assets(&self.config, out).await
            }
            Some(BaseCommand::Version) => {
                writeln!(out, "{} {}", self.name, self.version).map_err(Error::io)
            }
            Some(BaseCommand::Config(config_cmd)) => config_handlers::handle_config_command(
                args.config.as_deref(),
                config_cmd.command,
                out,
            ),
            None => writeln!(out, "{} {}: use --help for usage", self.name, self.version)
                .map_err(Error::io),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
