//! Within-file deduplication by `slug`.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::collect::{DataError, shape::entries_mut};

/// An entry dropped because an earlier entry in the same file had its slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedEntry {
    pub slug: String,
    pub removed_title: Option<String>,
    pub kept_title: Option<String>,
}

/// Entries removed from one file.
#[derive(Debug, Clone)]
pub struct FileFix {
    pub file: PathBuf,
    pub removed: Vec<RemovedEntry>,
}

/// Keep the first entry for each slug. Entries without a slug pass through.
pub fn dedup_by_slug(entries: Vec<Value>) -> (Vec<Value>, Vec<RemovedEntry>) {
    let mut first_index: FxHashMap<String, usize> = FxHashMap::default();
    let mut kept: Vec<Value> = Vec::with_capacity(entries.len());
    let mut removed = Vec::new();

    for entry in entries {
        let Some(slug) = slug_of(&entry) else {
            kept.push(entry);
            continue;
        };

        match first_index.get(&slug) {
            Some(&index) => removed.push(RemovedEntry {
                removed_title: title_of(&entry),
                kept_title: title_of(&kept[index]),
                slug,
            }),
            None => {
                first_index.insert(slug, kept.len());
                kept.push(entry);
            }
        }
    }

    (kept, removed)
}

/// Deduplicate the record array of a parsed document in place, keeping its
/// wrapper object and key order.
pub fn fix_document(value: &mut Value) -> Vec<RemovedEntry> {
    let Some(entries) = entries_mut(value) else {
        return Vec::new();
    };
    let (kept, removed) = dedup_by_slug(std::mem::take(entries));
    *entries = kept;
    removed
}

/// Write a document back as two-space pretty JSON with a trailing newline.
pub fn write_document(path: &Path, value: &Value) -> Result<(), DataError> {
    let mut content =
        serde_json::to_string_pretty(value).map_err(|e| DataError::Json(path.to_path_buf(), e))?;
    content.push('\n');
    fs::write(path, content).map_err(|e| DataError::Io(path.to_path_buf(), e))
}

pub(super) fn slug_of(entry: &Value) -> Option<String> {
    entry
        .get("slug")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn title_of(entry: &Value) -> Option<String> {
    ["title", "name"]
        .into_iter()
        .filter_map(|key| entry.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_dedup_keeps_first() {
        let entries = vec![json!({"slug": "a"}), json!({"slug": "b"}), json!({"slug": "a"})];
        let (kept, removed) = dedup_by_slug(entries);

        assert_eq!(kept, [json!({"slug": "a"}), json!({"slug": "b"})]);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].slug, "a");
    }

    #[test]
    fn test_dedup_reports_both_titles() {
        let entries = vec![
            json!({"slug": "x", "title": "Original"}),
            json!({"slug": "x", "title": "Corrected"}),
        ];
        let (_, removed) = dedup_by_slug(entries);
        assert_eq!(
            removed,
            [RemovedEntry {
                slug: "x".into(),
                removed_title: Some("Corrected".into()),
                kept_title: Some("Original".into()),
            }]
        );
    }

    #[test]
    fn test_dedup_passes_through_unslugged() {
        let entries = vec![
            json!({"title": "no slug"}),
            json!({"title": "no slug"}),
            json!("stray"),
            json!({"slug": ""}),
            json!({"slug": ""}),
        ];
        let (kept, removed) = dedup_by_slug(entries);
        assert_eq!(kept.len(), 5);
        assert!(removed.is_empty());
    }

    #[test]
    fn test_fix_document_preserves_wrapper() {
        let mut doc = json!({
            "version": 2,
            "posts": [{"slug": "a"}, {"slug": "a"}],
            "updated": "2024-01-01"
        });
        let removed = fix_document(&mut doc);
        assert_eq!(removed.len(), 1);

        let keys: Vec<_> = doc.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["version", "posts", "updated"]);
        assert_eq!(doc["posts"], json!([{"slug": "a"}]));
    }

    #[test]
    fn test_fix_document_unknown_shape() {
        let mut doc = json!({"settings": {}});
        assert!(fix_document(&mut doc).is_empty());
        assert_eq!(doc, json!({"settings": {}}));
    }

    #[test]
    fn test_write_document_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tags.json");
        write_document(&path, &json!([{"slug": "rust"}])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n  {\n    \"slug\": \"rust\"\n  }\n]\n");
    }
}
