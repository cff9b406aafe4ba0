//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Media Renamer - identify episodes and generate Plex-friendly filenames
#[derive(Parser, Debug)]
#[command(name = "media-renamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse filenames and show the structured interpretation
    Parse {
        /// Filenames or paths to parse
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,

        /// Output as JSON instead of a human-readable summary
        #[arg(long)]
        json: bool,
    },

    /// Preview the rename of every media file under a directory
    Preview {
        /// Directory to scan
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Verify shows and fill episode titles from TVMaze
        #[arg(long)]
        lookup: bool,

        /// Ask a local LLM for segment titles of anthology files
        #[arg(long)]
        llm: bool,
    },

    /// Group a season pack into Season/Specials folders
    Group {
        /// Directory to scan
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}
