//! Cross-file duplicate detection.
//!
//! A slug defined in two files of the same kind is reported, never merged:
//! the definitions may have drifted apart and a human has to pick one.

use std::collections::BTreeMap;
use std::fmt;

use crate::collect::Record;

/// What a slug identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlugKind {
    Category,
    Tag,
    Content,
}

impl SlugKind {
    /// Plural heading used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Tag => "tags",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for SlugKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Category => "category",
            Self::Tag => "tag",
            Self::Content => "content",
        };
        f.write_str(name)
    }
}

/// Where a slug is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File path relative to the data directory.
    pub file: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossFileDuplicate {
    pub kind: SlugKind,
    pub slug: String,
    pub locations: Vec<Location>,
}

/// Slug sources map: (kind, slug) → every file defining it.
#[derive(Debug, Default)]
pub struct SlugSources {
    sources: BTreeMap<(SlugKind, String), Vec<Location>>,
}

impl SlugSources {
    /// Record the definitions of one file. Repeats within the file count once.
    pub fn add_file<'a>(
        &mut self,
        kind: SlugKind,
        file: &str,
        records: impl IntoIterator<Item = &'a Record>,
    ) {
        for record in records {
            let slug = match kind {
                SlugKind::Content => record.slug().map(str::to_string),
                SlugKind::Category | SlugKind::Tag => record.definition_slug(),
            };
            let Some(slug) = slug else { continue };

            let locations = self.sources.entry((kind, slug)).or_default();
            if locations.iter().any(|l| l.file == file) {
                continue;
            }
            locations.push(Location {
                file: file.to_string(),
                title: record.title().map(str::to_string),
            });
        }
    }

    /// Slugs defined in more than one file, grouped by kind then slug.
    pub fn detect(&self) -> Vec<CrossFileDuplicate> {
        self.sources
            .iter()
            .filter(|(_, locations)| locations.len() > 1)
            .map(|((kind, slug), locations)| CrossFileDuplicate {
                kind: *kind,
                slug: slug.clone(),
                locations: locations.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<Record> {
        value
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Record::from_value)
            .collect()
    }

    #[test]
    fn test_detects_same_kind_only() {
        let mut sources = SlugSources::default();
        sources.add_file(
            SlugKind::Category,
            "essays/categories.json",
            &records(json!([{"slug": "x", "title": "X"}])),
        );
        sources.add_file(
            SlugKind::Category,
            "notes/categories.json",
            &records(json!([{"slug": "x", "title": "Ex"}])),
        );
        sources.add_file(
            SlugKind::Tag,
            "essays/tags.json",
            &records(json!([{"slug": "x"}])),
        );

        let duplicates = sources.detect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].kind, SlugKind::Category);
        assert_eq!(
            duplicates[0].locations,
            [
                Location {
                    file: "essays/categories.json".into(),
                    title: Some("X".into())
                },
                Location {
                    file: "notes/categories.json".into(),
                    title: Some("Ex".into())
                },
            ]
        );
    }

    #[test]
    fn test_repeats_in_one_file_not_cross_file() {
        let mut sources = SlugSources::default();
        sources.add_file(
            SlugKind::Content,
            "blog/posts.json",
            &records(json!([{"slug": "a"}, {"slug": "a"}])),
        );
        assert!(sources.detect().is_empty());
    }

    #[test]
    fn test_definitions_fall_back_to_name() {
        let mut sources = SlugSources::default();
        sources.add_file(SlugKind::Tag, "a/tags.json", &records(json!([{"name": "Deep Work"}])));
        sources.add_file(SlugKind::Tag, "b/tags.json", &records(json!([{"slug": "deep-work"}])));
        assert_eq!(sources.detect()[0].slug, "deep-work");
    }
}
