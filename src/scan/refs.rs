//! Inline category/tag references that have no formal definition.

use std::cmp::Reverse;

use rustc_hash::{FxHashMap, FxHashSet};

use super::SlugKind;
use crate::collect::Record;

/// Maximum example files listed per reference.
const MAX_EXAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedRef {
    pub folder: String,
    pub kind: SlugKind,
    pub slug: String,
    /// Number of records using the slug.
    pub count: usize,
    /// Up to three files using the slug, in scan order.
    pub examples: Vec<String>,
}

#[derive(Debug, Default)]
struct Usage {
    count: usize,
    examples: Vec<String>,
}

/// Definitions and usages of one kind within one folder.
#[derive(Debug, Default)]
pub struct RefCheck {
    defined: Option<FxHashSet<String>>,
    used: FxHashMap<String, Usage>,
}

impl RefCheck {
    /// Register the definition file. Without one, nothing is reported.
    pub fn define<'a>(&mut self, records: impl IntoIterator<Item = &'a Record>) {
        let defined = self.defined.get_or_insert_with(FxHashSet::default);
        defined.extend(records.into_iter().filter_map(Record::definition_slug));
    }

    /// Count a usage of `slug` by a record in `file`.
    pub fn use_slug(&mut self, slug: String, file: &str) {
        let usage = self.used.entry(slug).or_default();
        usage.count += 1;
        if usage.examples.len() < MAX_EXAMPLES && !usage.examples.iter().any(|f| f == file) {
            usage.examples.push(file.to_string());
        }
    }

    /// Used slugs lacking a definition, by count descending then slug.
    pub fn undefined(&self, folder: &str, kind: SlugKind) -> Vec<UndefinedRef> {
        let Some(defined) = &self.defined else {
            return Vec::new();
        };

        let mut refs: Vec<UndefinedRef> = self
            .used
            .iter()
            .filter(|(slug, _)| !defined.contains(*slug))
            .map(|(slug, usage)| UndefinedRef {
                folder: folder.to_string(),
                kind,
                slug: slug.clone(),
                count: usage.count,
                examples: usage.examples.clone(),
            })
            .collect();

        refs.sort_by(|a, b| {
            (Reverse(a.count), &a.slug).cmp(&(Reverse(b.count), &b.slug))
        });
        refs
    }
}

/// Category and tag checks of one content-type folder.
#[derive(Debug, Default)]
pub struct FolderRefs {
    pub categories: RefCheck,
    pub tags: RefCheck,
}

impl FolderRefs {
    /// Count every inline reference of a content record.
    pub fn use_record(&mut self, record: &Record, file: &str) {
        for slug in record.category_slugs() {
            self.categories.use_slug(slug, file);
        }
        for slug in record.tag_slugs() {
            self.tags.use_slug(slug, file);
        }
    }

    pub fn undefined(&self, folder: &str) -> Vec<UndefinedRef> {
        let mut refs = self.categories.undefined(folder, SlugKind::Category);
        refs.extend(self.tags.undefined(folder, SlugKind::Tag));
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(&value).unwrap()
    }

    #[test]
    fn test_undefined_sorted_by_count() {
        let mut refs = FolderRefs::default();
        refs.tags.define(&[record(json!({"slug": "rust"}))]);
        refs.use_record(&record(json!({"tags": ["rust", "go", "zig"]})), "notes/a.json");
        refs.use_record(&record(json!({"tags": ["zig"]})), "notes/b.json");

        let undefined = refs.undefined("notes");
        let summary: Vec<_> = undefined.iter().map(|r| (r.slug.as_str(), r.count)).collect();
        assert_eq!(summary, [("zig", 2), ("go", 1)]);
        assert_eq!(undefined[0].examples, ["notes/a.json", "notes/b.json"]);
        assert_eq!(undefined[0].kind, SlugKind::Tag);
    }

    #[test]
    fn test_no_definition_file_no_report() {
        let mut refs = FolderRefs::default();
        refs.use_record(&record(json!({"category": "Misc", "tags": ["x"]})), "blog/posts.json");
        assert!(refs.undefined("blog").is_empty());
    }

    #[test]
    fn test_examples_capped() {
        let mut check = RefCheck::default();
        check.define(std::iter::empty());
        for i in 0..5 {
            check.use_slug("orphan".into(), &format!("essays/{i}.json"));
        }
        check.use_slug("orphan".into(), "essays/0.json");

        let undefined = check.undefined("essays", SlugKind::Category);
        assert_eq!(undefined[0].count, 6);
        assert_eq!(undefined[0].examples.len(), 3);
    }

    #[test]
    fn test_ties_break_by_slug() {
        let mut check = RefCheck::default();
        check.define(std::iter::empty());
        check.use_slug("beta".into(), "f.json");
        check.use_slug("alpha".into(), "f.json");

        let slugs: Vec<_> = check
            .undefined("x", SlugKind::Tag)
            .into_iter()
            .map(|r| r.slug)
            .collect();
        assert_eq!(slugs, ["alpha", "beta"]);
    }
}
