//! URL slug generation.

use regex::Regex;
use std::sync::LazyLock;

static RE_NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Turn a title or category name into a URL slug.
///
/// Transliterates to ASCII, lowercases, and collapses every run of
/// non-alphanumerics into a single `-`.
///
/// ```text
/// "Boy, Interrupted"  → "boy-interrupted"
/// "Café Society"      → "cafe-society"
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text).to_lowercase();
    RE_NON_ALNUM
        .replace_all(&ascii, "-")
        .trim_matches('-')
        .to_string()
}
