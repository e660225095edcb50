use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tidywin",
    about = "Find reclaimable disk space and delete only what you approve",
    version
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/tidywin/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan temp files, program remains, browser caches and recycle bins (never deletes)
    Scan {
        /// Print the report as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Write the report JSON to this file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Only show items from one source (e.g. "browser-caches")
        #[arg(long)]
        source: Option<String>,
    },

    /// Delete approved items (requires --confirm to actually delete)
    Clean {
        /// JSON file with a saved scan report or an array of items
        #[arg(long)]
        items: PathBuf,

        /// Actually delete. Without this flag, only validates.
        #[arg(long)]
        confirm: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List large files (report only)
    LargeFiles {
        /// Root to search (defaults to the home directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Minimum file size (e.g. "100MB", "1GB")
        #[arg(long, default_value = "100MB")]
        min_size: String,
    },

    /// Show free space per volume
    Disk,
}
