//! CLI argument parsing and command definitions.
//!
//! Global flags (configuration file, verbosity) plus the site commands:
//! build, search, tags, copy-assets, config, version.

use clap::{Parser, Subcommand};
use storyshelf_catalog::Variant;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "storyshelf", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "STORYSHELF_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// Render the catalog and story pages, then copy content images.
    Build {
        /// Output directory (overrides `site.output_dir`).
        #[arg(short, long)]
        output: Option<String>,

        /// Card style: playful or technical (overrides `catalog.variant`).
        #[arg(long)]
        variant: Option<Variant>,
    },

    /// Filter the catalog from the command line.
    Search {
        /// Tag to select; repeat for several (any match).
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Fuzzy query over title, tags and description.
        #[arg(short = 'Q', long)]
        query: Option<String>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List tags by frequency.
    Tags {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Copy content images into the public output directory.
    CopyAssets,

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "site.base_url").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "catalog.variant").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
