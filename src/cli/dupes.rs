//! `folio dupes`: run the consistency scanner and write its report.
//!
//! Failures are logged, never returned: the command always exits 0.

use std::fs;

use anyhow::{Context, Result};

use crate::cli::DupesArgs;
use crate::config::SiteConfig;
use crate::log;
use crate::scan::{ScanReport, run_scan};
use crate::utils::path::relative_display;

pub fn run_dupes(args: &DupesArgs, config: &SiteConfig) -> Result<()> {
    if let Err(err) = scan_and_report(args.dry_run, config) {
        log!("error"; "{err:#}");
    }
    Ok(())
}

fn scan_and_report(dry_run: bool, config: &SiteConfig) -> Result<ScanReport> {
    let report = run_scan(&config.content.data, dry_run)?;

    let path = &config.dupes.report;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, report.to_markdown())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log!("dupes"; "{}", report.summary());
    log!("dupes"; "report written to {}", relative_display(path, config.get_root()));
    Ok(report)
}
