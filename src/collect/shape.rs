//! Recognized JSON document shapes and the records inside them.
//!
//! Data files come in a handful of layouts:
//!
//! ```text
//! { "pages": [...] }        → Pages
//! { "posts": [...] }        → Posts
//! { "categories": [...] }   → Categories
//! { "tags": [...] }         → Tags
//! [ ... ]                   → Items
//! anything else             → Unknown (skipped)
//! ```
//!
//! The shape is detected once, then every array entry is parsed into a
//! [`Record`] on its own so one odd entry never hides its siblings.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::slugify;

/// Wrapper keys, in detection order.
pub const WRAPPER_KEYS: [&str; 4] = ["pages", "posts", "categories", "tags"];

#[derive(Debug, Clone, Copy)]
pub enum DataShape<'a> {
    Pages(&'a [Value]),
    Posts(&'a [Value]),
    Categories(&'a [Value]),
    Tags(&'a [Value]),
    Items(&'a [Value]),
    Unknown,
}

impl<'a> DataShape<'a> {
    pub fn detect(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Self::Items(items),
            Value::Object(map) => {
                for key in WRAPPER_KEYS {
                    if let Some(Value::Array(items)) = map.get(key) {
                        return match key {
                            "pages" => Self::Pages(items),
                            "posts" => Self::Posts(items),
                            "categories" => Self::Categories(items),
                            _ => Self::Tags(items),
                        };
                    }
                }
                Self::Unknown
            }
            _ => Self::Unknown,
        }
    }

    /// Raw entries of the shape (empty for `Unknown`).
    pub fn entries(&self) -> &'a [Value] {
        match *self {
            Self::Pages(items)
            | Self::Posts(items)
            | Self::Categories(items)
            | Self::Tags(items)
            | Self::Items(items) => items,
            Self::Unknown => &[],
        }
    }

    /// Entries that parse as records; non-objects are dropped.
    pub fn records(self) -> impl Iterator<Item = Record> + 'a {
        self.entries().iter().filter_map(Record::from_value)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Mutable access to the record array of a document, wrapper included.
pub fn entries_mut(value: &mut Value) -> Option<&mut Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            let key = WRAPPER_KEYS
                .into_iter()
                .find(|key| map.get(*key).is_some_and(Value::is_array))?;
            map.get_mut(key).and_then(Value::as_array_mut)
        }
        _ => None,
    }
}

// ============================================================================
// records
// ============================================================================

/// A content record, category, or tag definition.
///
/// Every field is read on its own: a field with an unexpected type (say a
/// localized `"title": {"en": ...}`) becomes `None` instead of rejecting the
/// whole record, so the slug still counts.
#[derive(Debug, Default, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub permalink: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<OneOrMany<TagRef>>,
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Option<OneOrMany<TagRef>>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<OneOrMany<TagRef>>,
}

/// Inline reference to a category or tag.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagRef {
    Name(String),
    Object {
        #[serde(default, deserialize_with = "lenient")]
        slug: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        name: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        title: Option<String>,
    },
    Other(IgnoredAny),
}

/// Deserialize a field, mapping a value of the wrong type to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::Many(items) => items.iter(),
            Self::One(item) => std::slice::from_ref(item).iter(),
        }
    }
}

impl TagRef {
    /// Slug of the reference: an explicit `slug`, else the slugified name.
    pub fn slug(&self) -> Option<String> {
        let slug = match self {
            Self::Name(name) => slugify(name),
            Self::Object { slug: Some(s), .. } if !s.trim().is_empty() => s.trim().to_string(),
            Self::Object { name, title, .. } => slugify(name.as_deref().or(title.as_deref())?),
            Self::Other(_) => return None,
        };
        (!slug.is_empty()).then_some(slug)
    }
}

impl Record {
    /// Parse a single array entry. Returns `None` for non-objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }

    /// Trimmed, non-empty `slug`.
    pub fn slug(&self) -> Option<&str> {
        non_blank(self.slug.as_deref())
    }

    /// Slug of a category or tag definition, falling back to its name.
    pub fn definition_slug(&self) -> Option<String> {
        if let Some(slug) = self.slug() {
            return Some(slug.to_string());
        }
        let slug = slugify(non_blank(self.name.as_deref()).or(self.title())?);
        (!slug.is_empty()).then_some(slug)
    }

    /// First explicit location among `path`, `permalink`, and `url`.
    pub fn explicit_path(&self) -> Option<&str> {
        non_blank(self.path.as_deref())
            .or_else(|| non_blank(self.permalink.as_deref()))
            .or_else(|| non_blank(self.url.as_deref()))
    }

    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref()).or_else(|| non_blank(self.name.as_deref()))
    }

    /// Slugs of every inline category (`category` and `categories`).
    pub fn category_slugs(&self) -> Vec<String> {
        let mut slugs: Vec<String> = Vec::new();
        for tag_ref in [&self.category, &self.categories]
            .into_iter()
            .flatten()
            .flat_map(OneOrMany::iter)
        {
            if let Some(slug) = tag_ref.slug()
                && !slugs.contains(&slug)
            {
                slugs.push(slug);
            }
        }
        slugs
    }

    /// Slugs of every inline tag.
    pub fn tag_slugs(&self) -> Vec<String> {
        let mut slugs: Vec<String> = Vec::new();
        for tag_ref in self.tags.iter().flat_map(OneOrMany::iter) {
            if let Some(slug) = tag_ref.slug()
                && !slugs.contains(&slug)
            {
                slugs.push(slug);
            }
        }
        slugs
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_shapes() {
        assert!(matches!(DataShape::detect(&json!({"pages": []})), DataShape::Pages(_)));
        assert!(matches!(DataShape::detect(&json!({"posts": [1]})), DataShape::Posts(_)));
        assert!(matches!(
            DataShape::detect(&json!({"categories": []})),
            DataShape::Categories(_)
        ));
        assert!(matches!(DataShape::detect(&json!({"tags": []})), DataShape::Tags(_)));
        assert!(matches!(DataShape::detect(&json!([])), DataShape::Items(_)));
    }

    #[test]
    fn test_detect_unknown() {
        assert!(!DataShape::detect(&json!({"title": "About"})).is_known());
        assert!(!DataShape::detect(&json!({"posts": "not an array"})).is_known());
        assert!(!DataShape::detect(&json!("text")).is_known());
        assert!(DataShape::detect(&json!(42)).entries().is_empty());
    }

    #[test]
    fn test_records_skip_non_objects() {
        let value = json!([{"slug": "a"}, "stray", 3, {"slug": "b"}]);
        let slugs: Vec<_> = DataShape::detect(&value)
            .records()
            .filter_map(|r| r.slug.clone())
            .collect();
        assert_eq!(slugs, ["a", "b"]);
    }

    #[test]
    fn test_record_inline_refs() {
        let record = Record::from_value(&json!({
            "slug": "boy-interrupted",
            "category": "Musings",
            "tags": ["Film", {"slug": "grief"}, {"name": "Mental Health"}, 7, "film"]
        }))
        .unwrap();
        assert_eq!(record.category_slugs(), ["musings"]);
        assert_eq!(record.tag_slugs(), ["film", "grief", "mental-health"]);
    }

    #[test]
    fn test_record_category_object_and_list() {
        let record = Record::from_value(&json!({
            "category": {"slug": "deep-dives", "name": "Deep Dives"},
            "categories": ["Rust", "deep dives"]
        }))
        .unwrap();
        assert_eq!(record.category_slugs(), ["deep-dives", "rust"]);
    }

    #[test]
    fn test_explicit_path_priority() {
        let record = Record::from_value(&json!({
            "path": " ",
            "permalink": "/about",
            "url": "https://example.com/x"
        }))
        .unwrap();
        assert_eq!(record.explicit_path(), Some("/about"));
    }

    #[test]
    fn test_definition_slug_fallback() {
        let record = Record::from_value(&json!({"name": "Philosophy of Mind"})).unwrap();
        assert_eq!(record.definition_slug().as_deref(), Some("philosophy-of-mind"));
        assert!(Record::from_value(&json!({})).unwrap().definition_slug().is_none());
    }

    #[test]
    fn test_mistyped_fields_keep_record() {
        let record = Record::from_value(&json!({
            "slug": "hello",
            "title": {"en": "Hello"},
            "name": 12,
            "url": 7,
            "tags": ["x", {"slug": 3, "name": "Deep Work"}]
        }))
        .unwrap();
        assert_eq!(record.slug(), Some("hello"));
        assert_eq!(record.title(), None);
        assert_eq!(record.explicit_path(), None);
        assert_eq!(record.tag_slugs(), ["x", "deep-work"]);
    }

    #[test]
    fn test_entries_mut_keeps_wrapper() {
        let mut value = json!({"meta": 1, "posts": [{"slug": "a"}]});
        entries_mut(&mut value).unwrap().push(json!({"slug": "b"}));
        assert_eq!(value["posts"].as_array().unwrap().len(), 2);
        assert_eq!(value["meta"], 1);
        assert!(entries_mut(&mut json!({"x": 1})).is_none());
    }
}
