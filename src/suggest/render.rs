//! HTML rendering of suggestion lists.

use std::fmt::Write;

use super::SuggestionLink;
use crate::utils::html::escape;

/// Message shown when nothing is close enough.
pub const NO_SUGGESTIONS: &str = "No similar URLs found.";

/// Render links as `<ul class="folio-suggestions">`, or a short paragraph
/// when the list is empty.
pub fn render_html(links: &[SuggestionLink]) -> String {
    if links.is_empty() {
        return format!("<p>{NO_SUGGESTIONS}</p>");
    }

    let mut html = String::from("<ul class=\"folio-suggestions\">\n");
    for link in links {
        let url = escape(&link.url);
        let _ = writeln!(html, "  <li><a href=\"{url}\">{url}</a></li>");
    }
    html.push_str("</ul>");
    html
}
