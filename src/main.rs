//! Media Renamer CLI
//!
//! A command-line tool that identifies episodes, movies and music from messy
//! filenames and generates canonical, Plex-friendly names.

use clap::Parser;
use media_renamer::cli::{
    args::{Cli, Commands},
    commands::{group, parse, preview},
};
use media_renamer::models::config::load_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = load_config();

    match cli.command {
        Commands::Parse { names, json } => {
            parse::parse_names(&names, json, &config)?;
        }

        Commands::Preview { path, lookup, llm } => {
            preview::preview(&path, lookup, llm, &config).await?;
        }

        Commands::Group { path } => {
            group::group(&path)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("media_renamer=debug")
    } else {
        EnvFilter::new("media_renamer=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
