//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://example.com"   # prefix for full suggestion URLs
//! not_found = "/404"            # generic not-found route
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Public base URL. Suggestions render as bare paths when unset.
    pub url: Option<String>,

    /// Route of the generic not-found page; no suggestions are computed for it.
    pub not_found: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            url: None,
            not_found: "/404".to_string(),
        }
    }
}

impl SiteSectionConfig {
    const URL: FieldPath = FieldPath::new("site.url");
    const NOT_FOUND: FieldPath = FieldPath::new("site.not_found");

    /// Base URL without a trailing slash, ready to prefix a site path.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().map_or("", |u| u.trim_end_matches('/'))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(url) = &self.url
            && url::Url::parse(url).is_err()
        {
            diag.error_with_hint(
                Self::URL,
                format!("`{url}` is not an absolute URL"),
                "include the scheme, e.g. \"https://example.com\"",
            );
        }

        if !self.not_found.starts_with('/') {
            diag.error_with_hint(
                Self::NOT_FOUND,
                "must start with `/`",
                format!("use \"/{}\"", self.not_found),
            );
        }
    }
}
