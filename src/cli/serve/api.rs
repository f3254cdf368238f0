//! JSON endpoints.
//!
//! | Route                        | Body                                  |
//! |------------------------------|---------------------------------------|
//! | `GET /api/404-suggester`     | `{paths, map}`                        |
//! | `GET /api/suggestions?path=` | `{target, suggestions: [{path, url}]}` |

use serde_json::json;

use crate::collect::collect_paths;
use crate::config::SiteConfig;
use crate::core::decode_request_path;
use crate::suggest::{SuggestOptions, SuggestionsResponse, suggest, to_links};

pub const SUGGESTER_ROUTE: &str = "/api/404-suggester";
pub const SUGGESTIONS_ROUTE: &str = "/api/suggestions";

/// Status and body for `/api/404-suggester`.
pub fn path_data(config: &SiteConfig) -> (u16, Vec<u8>) {
    let collection = collect_paths(config);
    match serde_json::to_vec(&collection) {
        Ok(body) => (200, body),
        Err(err) => (500, path_data_error(&err.to_string())),
    }
}

/// Empty `{paths, map}` document carrying an error message.
pub fn path_data_error(message: &str) -> Vec<u8> {
    json!({
        "paths": [],
        "map": { "rootFiles": [], "folders": {} },
        "error": message,
    })
    .to_string()
    .into_bytes()
}

/// Status and body for `/api/suggestions`.
pub fn suggestions(query: &str, config: &SiteConfig) -> (u16, Vec<u8>) {
    let target = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "path")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let Some(target) = target else {
        return (400, error_body("missing `path` query parameter"));
    };
    let target = decode_request_path(&target);

    let collection = collect_paths(config);
    let found = suggest(&target, &collection.paths, &SuggestOptions::from_config(config));
    let response = SuggestionsResponse {
        target,
        suggestions: to_links(&found, config.site.base_url()),
    };

    match serde_json::to_vec(&response) {
        Ok(body) => (200, body),
        Err(err) => (500, error_body(&err.to_string())),
    }
}

pub fn error_body(message: &str) -> Vec<u8> {
    json!({ "error": message }).to_string().into_bytes()
}
