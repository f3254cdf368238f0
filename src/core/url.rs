//! Site-relative URL paths.
//!
//! - Internal representation: always decoded
//! - Always starts with `/`, never ends with `/` (except the root itself)
//! - No query string, fragment, or empty segments

use std::fmt;
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use serde::{Serialize, Serializer};

/// A normalized site path such as `/essays/musings/boy-interrupted`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SitePath(Arc<str>);

impl SitePath {
    /// Parse a path, permalink, or absolute URL into a site path.
    ///
    /// Absolute URLs are reduced to their path component. Returns `None`
    /// for blank input or URLs that fail to parse.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let path = if trimmed.contains("://") {
            let parsed = url::Url::parse(trimmed).ok()?;
            decode(parsed.path())
        } else {
            let without_query = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
            decode(without_query)
        };

        Some(Self::from_segments_unchecked(path.split('/')))
    }

    /// Join slug segments: `["essays", "musings", "x"]` → `/essays/musings/x`.
    ///
    /// Returns `None` if any segment is empty, so a missing category never
    /// produces a half-built path.
    pub fn from_segments(segments: &[&str]) -> Option<Self> {
        if segments.is_empty() || segments.iter().any(|s| s.trim_matches('/').is_empty()) {
            return None;
        }
        Some(Self::from_segments_unchecked(
            segments.iter().flat_map(|s| s.split('/')),
        ))
    }

    fn from_segments_unchecked<'a>(segments: impl Iterator<Item = &'a str>) -> Self {
        let joined = segments
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self(Arc::from(format!("/{joined}")))
    }

    /// Get the decoded path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SitePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SitePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SitePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

fn decode(path: &str) -> String {
    percent_decode_str(path)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Decode a request URL into the path the visitor asked for.
///
/// Strips the query string and fragment and percent-decodes, but keeps the
/// path otherwise as requested (trailing slashes included).
pub fn decode_request_path(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = decode(path);
    if decoded.starts_with('/') {
        decoded
    } else {
        format!("/{decoded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_slashes() {
        let p = SitePath::parse("essays//musings/boy-interrupted/").unwrap();
        assert_eq!(p.as_str(), "/essays/musings/boy-interrupted");
    }

    #[test]
    fn test_parse_root_and_blank() {
        assert_eq!(SitePath::parse("/").unwrap().as_str(), "/");
        assert!(SitePath::parse("   ").is_none());
    }

    #[test]
    fn test_parse_strips_query_and_fragment() {
        let p = SitePath::parse("/notes/rust?ref=home#top").unwrap();
        assert_eq!(p.as_str(), "/notes/rust");
    }

    #[test]
    fn test_parse_absolute_url() {
        let p = SitePath::parse("https://example.com/blog/hello%20world/").unwrap();
        assert_eq!(p.as_str(), "/blog/hello world");
        assert!(SitePath::parse("https://").is_none());
    }

    #[test]
    fn test_from_segments() {
        let p = SitePath::from_segments(&["essays", "musings", "x"]).unwrap();
        assert_eq!(p.as_str(), "/essays/musings/x");
        assert!(SitePath::from_segments(&["essays", "", "x"]).is_none());
        assert!(SitePath::from_segments(&[]).is_none());
    }

    #[test]
    fn test_decode_request_path() {
        assert_eq!(decode_request_path("/blog/caf%C3%A9?x=1"), "/blog/café");
        assert_eq!(decode_request_path("/blog/"), "/blog/");
        assert_eq!(decode_request_path("blog"), "/blog");
    }
}
