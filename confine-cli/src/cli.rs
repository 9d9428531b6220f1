//! CLI structure definition.
//!
//! This module defines the command-line interface using clap's derive
//! macros. There are no subcommands: the tool does one thing.

use clap::Parser;
use std::path::PathBuf;

/// Command-line tool for generating least-privilege sandbox profiles.
#[derive(Parser)]
#[command(name = "confine")]
#[command(version, about = "Compile a least-privilege sandbox profile for a project", long_about = None)]
pub struct Cli {
    /// Project root directory the confined process may read and write
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Additional write-allow paths (absolute, ~-prefixed, or home-relative)
    #[arg(value_name = "PATH")]
    pub extra_write: Vec<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long)]
    pub quiet: bool,
}
