//! `folio paths`: dump the `{paths, map}` document.

use std::fs;
use std::io::{Write, stdout};

use anyhow::{Context, Result};

use crate::cli::PathsArgs;
use crate::collect::collect_paths;
use crate::config::SiteConfig;
use crate::log;
use crate::utils::plural_count;

pub fn run_paths(args: &PathsArgs, config: &SiteConfig) -> Result<()> {
    write_paths(args, config, &mut stdout().lock())
}

/// Emit the document to `args.output`, or to `out` when no file is given.
/// Nothing but the document is ever written to `out`.
fn write_paths(args: &PathsArgs, config: &SiteConfig, out: &mut impl Write) -> Result<()> {
    let collection = collect_paths(config);

    let json = if args.pretty {
        serde_json::to_string_pretty(&collection)?
    } else {
        serde_json::to_string(&collection)?
    };

    let Some(output) = &args.output else {
        writeln!(out, "{json}")?;
        return Ok(());
    };

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output, format!("{json}\n"))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log!("paths"; "{} written to {}", plural_count(collection.paths.len(), "path"), output.display());
    Ok(())
}
