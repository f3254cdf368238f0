//! Folio - content tooling for a personal site.
//!
//! Collects every path the site can serve, suggests close matches for
//! missing ones, and keeps the JSON content store free of duplicates.

mod cli;
mod collect;
mod config;
mod core;
mod logger;
mod scan;
mod suggest;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = match SiteConfig::load(&cli) {
        Ok(config) => init_config(config),
        // dupes always exits 0, even on a broken config
        Err(err) if matches!(cli.command, Commands::Dupes { .. }) => {
            log!("error"; "{err:#}");
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(),
        Commands::Suggest { args } => cli::suggest::run_suggest(args, &config),
        Commands::Paths { args } => cli::paths::run_paths(args, &config),
        Commands::Dupes { args } => cli::dupes::run_dupes(args, &config),
    }
}
