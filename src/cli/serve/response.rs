//! HTTP response handlers.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use super::inject::inject_suggestions;
use crate::config::SiteConfig;
use crate::utils::mime::types::{HTML, JSON, PLAIN};

/// Custom 404 page looked up in the serve root.
const NOT_FOUND_PAGE: &str = "404.html";

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond 404 with the suggestion list in the custom or built-in page.
pub fn respond_not_found(request: Request, config: &SiteConfig, suggestions: &str) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, HTML);
    }

    let custom_404 = config.serve.root.join(NOT_FOUND_PAGE);
    let body = match fs::read(&custom_404) {
        Ok(page) => inject_suggestions(&page, suggestions),
        Err(_) => default_not_found_page(suggestions).into_bytes(),
    };
    send_body(request, 404, HTML, body)
}

fn default_not_found_page(suggestions: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>404 Not Found</title></head>\n\
         <body>\n<main>\n<h1>404 Not Found</h1>\n<p>Were you looking for one of these?</p>\n\
         {suggestions}\n</main>\n</body>\n</html>\n"
    )
}

/// Respond with a JSON body.
pub fn respond_json(request: Request, status: u16, body: Vec<u8>) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, JSON);
    }
    send_body(request, status, JSON, body)
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    // static ASCII pairs always parse
    Header::from_bytes(key, value).unwrap()
}
