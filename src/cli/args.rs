//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Content tooling for a personal site: 404 suggestions, path collection
/// and data hygiene
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: folio.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// JSON data directory (relative to project root)
    #[arg(long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub data: Option<PathBuf>,

    /// SQLite content database (relative to project root)
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub database: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the built site with a suggesting 404 page and the path API
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory of static files to serve
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        root: Option<PathBuf>,
    },

    /// Suggest known paths close to a missing one
    Suggest {
        #[command(flatten)]
        args: SuggestArgs,
    },

    /// Print every collected site path and the site map as JSON
    #[command(visible_alias = "p")]
    Paths {
        #[command(flatten)]
        args: PathsArgs,
    },

    /// Remove within-file duplicates and report cross-file inconsistencies
    #[command(visible_alias = "d")]
    Dupes {
        #[command(flatten)]
        args: DupesArgs,
    },
}

/// Suggest command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct SuggestArgs {
    /// The path that was not found, e.g. `/blgo/hello`
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Maximum number of suggestions
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Maximum edit distance
    #[arg(short = 'd', long)]
    pub max_distance: Option<usize>,

    /// Print `{target, suggestions}` JSON instead of a list
    #[arg(long)]
    pub json: bool,
}

/// Paths command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct PathsArgs {
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

/// Dupes command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct DupesArgs {
    /// Compute within-file fixes without rewriting data files
    #[arg(long)]
    pub dry_run: bool,

    /// Markdown report path (relative to project root)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub report: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["folio", "serve", "-p", "8080", "-i", "0.0.0.0"]);
        match cli.command {
            Commands::Serve { port, interface, root } => {
                assert_eq!(port, Some(8080));
                assert_eq!(interface, Some("0.0.0.0".parse().unwrap()));
                assert!(root.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["folio", "dupes", "--dry-run", "-v", "--data", "content"]);
        assert!(cli.verbose);
        assert_eq!(cli.data, Some(PathBuf::from("content")));
        assert!(matches!(cli.command, Commands::Dupes { args } if args.dry_run));
    }

    #[test]
    fn test_parse_suggest() {
        let cli = Cli::parse_from(["folio", "suggest", "/blgo", "-n", "3", "--json"]);
        let Commands::Suggest { args } = cli.command else {
            panic!("expected suggest");
        };
        assert_eq!(args.path, "/blgo");
        assert_eq!(args.limit, Some(3));
        assert!(args.max_distance.is_none());
        assert!(args.json);
    }
}
