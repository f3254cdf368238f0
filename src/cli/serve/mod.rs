//! Static file server with a suggesting 404 page.
//!
//! # Routes
//!
//! ```text
//! /api/404-suggester   → {paths, map}
//! /api/suggestions     → {target, suggestions}
//! anything else        → file under serve.root, else 404 with suggestions
//! ```

mod api;
mod inject;
mod lifecycle;
mod path;
mod response;

use crate::{
    collect::collect_paths,
    config::{SiteConfig, cfg},
    core::{decode_request_path, is_shutdown, register_server},
    debug, log,
    suggest::{SuggestOptions, render_html, suggest, to_links},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

/// Number of request handler threads.
const REQUEST_THREADS: usize = 4;

/// Bind the server and handle requests until Ctrl+C.
pub fn serve() -> Result<()> {
    let config = cfg();
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    debug!("serve"; "static files from {}", config.serve.root.display());
    if !config.serve.root.is_dir() {
        log!("warning"; "{} does not exist, every page will 404", config.serve.root.display());
    }

    run_request_loop(&server)
}

fn run_request_loop(server: &Server) -> Result<()> {
    let config = cfg();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        let config = Arc::clone(&config);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    let url = request.url().to_string();
    let (route, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
    let readable = matches!(request.method(), Method::Get | Method::Head);

    debug!("serve"; "{} {}", request.method(), url);

    match route {
        api::SUGGESTER_ROUTE if readable => {
            let (status, body) = api::path_data(config);
            return response::respond_json(request, status, body);
        }
        api::SUGGESTIONS_ROUTE if readable => {
            let (status, body) = api::suggestions(query, config);
            return response::respond_json(request, status, body);
        }
        api::SUGGESTER_ROUTE | api::SUGGESTIONS_ROUTE => {
            return response::respond_json(request, 405, api::error_body("method not allowed"));
        }
        _ => {}
    }

    if let Some(path) = path::resolve_path(&url, &config.serve.root) {
        return response::respond_file(request, &path);
    }

    let fragment = suggestions_html(&url, config);
    response::respond_not_found(request, config, &fragment)
}

/// Suggestion list for a missed URL, rendered as HTML.
fn suggestions_html(url: &str, config: &SiteConfig) -> String {
    let target = decode_request_path(url);
    let opts = SuggestOptions::from_config(config);
    if opts.is_not_found(&target) {
        return render_html(&[]);
    }

    let collection = collect_paths(config);
    let found = suggest(&target, &collection.paths, &opts);
    render_html(&to_links(&found, config.site.base_url()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_at;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_suggestions_html() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("data/notes")).unwrap();
        fs::write(dir.path().join("data/notes/notes.json"), r#"[{"slug": "rust"}]"#).unwrap();
        let config = test_config_at(dir.path());

        let html = suggestions_html("/notes/rusty?ref=x", &config);
        assert!(html.starts_with("<ul class=\"folio-suggestions\">"));
        assert!(html.contains("<a href=\"/notes/rust\">/notes/rust</a>"));

        assert_eq!(
            suggestions_html("/404", &config),
            "<p>No similar URLs found.</p>"
        );
    }
}
