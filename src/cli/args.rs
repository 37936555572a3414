//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hoard - configuration and dependency checks for a personal web archive.
#[derive(Debug, Parser)]
#[command(name = "hoard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Archive directory (overrides OUTPUT_DIR)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Disable colored output (overrides USE_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show configuration, dependencies and folders (default)
    Info(InfoArgs),

    /// Verify the environment is ready for archiving
    Check(CheckArgs),

    /// Show every setting with its value and source
    Config(ConfigArgs),
}

/// Arguments for `hoard info`.
#[derive(Debug, Clone, Default, Args)]
pub struct InfoArgs {
    /// Print the resolution report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `hoard check`.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    /// Also require the index database to exist
    #[arg(long)]
    pub db: bool,
}

/// Arguments for `hoard config`.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Print settings as JSON
    #[arg(long)]
    pub json: bool,
}
