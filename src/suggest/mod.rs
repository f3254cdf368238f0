//! 404 suggestions: rank known paths by edit distance to a missing one.
//!
//! ```text
//! "/blgo/hello"  ──┬── /blog/hello   (2)
//!                  ├── /blog/help    (3)
//!                  └── ...
//! ```
//!
//! Candidates beyond `max_distance` are dropped, the rest sorted stably by
//! distance (ties keep collection order), deduplicated, and truncated to
//! `max_suggestions`.

mod distance;
mod render;

pub use distance::bounded_distance;
pub use render::{NO_SUGGESTIONS, render_html};

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::core::SitePath;

/// Tuning for a single suggestion request.
#[derive(Debug, Clone)]
pub struct SuggestOptions {
    pub max_suggestions: usize,
    pub max_distance: usize,
    /// Generic not-found route; requests for it get no suggestions.
    pub not_found: String,
}

impl SuggestOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            max_suggestions: config.suggest.max_suggestions,
            max_distance: config.suggest.max_distance,
            not_found: config.site.not_found.clone(),
        }
    }

    /// Whether `target` is the not-found route itself (trailing `/` ignored).
    pub fn is_not_found(&self, target: &str) -> bool {
        trim_slash(target) == trim_slash(&self.not_found)
    }
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub path: SitePath,
    pub distance: usize,
}

/// Display form of a suggestion: the path plus the full URL to link to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionLink {
    pub path: SitePath,
    pub url: String,
}

/// Body of `/api/suggestions` and `folio suggest --json`.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub target: String,
    pub suggestions: Vec<SuggestionLink>,
}

/// Rank `candidates` by distance to `target`.
pub fn suggest(target: &str, candidates: &[SitePath], opts: &SuggestOptions) -> Vec<Suggestion> {
    if opts.is_not_found(target) || opts.max_suggestions == 0 {
        return Vec::new();
    }

    let mut scored: Vec<Suggestion> = candidates
        .iter()
        .filter_map(|path| {
            let distance = bounded_distance(target, path.as_str(), opts.max_distance);
            (distance <= opts.max_distance).then(|| Suggestion {
                path: path.clone(),
                distance,
            })
        })
        .collect();

    // stable: ties keep collection order
    scored.sort_by_key(|s| s.distance);

    let mut seen = FxHashSet::default();
    scored.retain(|s| seen.insert(s.path.clone()));
    scored.truncate(opts.max_suggestions);
    scored
}

/// Attach full URLs: `base_url + path`, or the bare path without a base.
pub fn to_links(suggestions: &[Suggestion], base_url: &str) -> Vec<SuggestionLink> {
    let base = base_url.trim_end_matches('/');
    suggestions
        .iter()
        .map(|s| SuggestionLink {
            path: s.path.clone(),
            url: format!("{base}{}", s.path),
        })
        .collect()
}

fn trim_slash(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
