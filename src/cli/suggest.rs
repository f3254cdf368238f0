//! `folio suggest`: print the closest known paths for a missing one.

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use crate::cli::SuggestArgs;
use crate::collect::collect_paths;
use crate::config::SiteConfig;
use crate::core::decode_request_path;
use crate::log;
use crate::suggest::{NO_SUGGESTIONS, SuggestOptions, SuggestionsResponse, suggest, to_links};

pub fn run_suggest(args: &SuggestArgs, config: &SiteConfig) -> Result<()> {
    let target = decode_request_path(&args.path);
    let opts = SuggestOptions::from_config(config);

    if opts.is_not_found(&target) {
        log!("suggest"; "{} is the not-found route, nothing to suggest", target);
    }

    let collection = collect_paths(config);
    let suggestions = suggest(&target, &collection.paths, &opts);
    let links = to_links(&suggestions, config.site.base_url());

    if args.json {
        let response = SuggestionsResponse {
            target,
            suggestions: links,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if links.is_empty() {
        println!("{NO_SUGGESTIONS}");
        return Ok(());
    }

    for (suggestion, link) in suggestions.iter().zip(&links) {
        let distance = format!("{:>3}", suggestion.distance);
        println!(
            "{}  {}",
            distance.if_supports_color(Stream::Stdout, |d| d.dimmed()),
            link.url
        );
    }
    Ok(())
}
