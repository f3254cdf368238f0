//! Path collection: every URL path the site can serve.
//!
//! Sources, in order:
//!
//! 1. the content database (when configured), one table per content type;
//! 2. the JSON data tree (root pages, then each content-type folder).
//!
//! Paths are normalized and deduplicated keeping first-seen order. A source
//! that cannot be read is logged and contributes nothing, so collection
//! itself never fails.

mod cache;
mod database;
mod error;
mod map;
pub mod shape;
mod slug;
pub mod tree;

pub use cache::{DATA_CACHE, read_json};
pub use database::{ContentRow, read_rows};
pub use error::DataError;
pub use map::SiteMap;
pub use shape::{DataShape, Record};
pub use slug::slugify;
pub use tree::{DataTree, FileRole};

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::core::SitePath;
use crate::utils::plural_count;
use crate::{debug, log};

/// Collected paths plus the site map, as served by `/api/404-suggester`.
#[derive(Debug, Default, Clone, Serialize)]
pub struct PathCollection {
    pub paths: Vec<SitePath>,
    pub map: SiteMap,
}

/// Ordered, deduplicated path list.
#[derive(Debug, Default)]
struct PathSet {
    seen: FxHashSet<SitePath>,
    paths: Vec<SitePath>,
}

impl PathSet {
    fn push(&mut self, path: Option<SitePath>) {
        if let Some(path) = path
            && self.seen.insert(path.clone())
        {
            self.paths.push(path);
        }
    }

    fn segments(&mut self, segments: &[&str]) {
        self.push(SitePath::from_segments(segments));
    }

    fn raw(&mut self, raw: &str) {
        self.push(SitePath::parse(raw));
    }

    fn len(&self) -> usize {
        self.paths.len()
    }

    fn into_vec(self) -> Vec<SitePath> {
        self.paths
    }
}

/// Collect every known site path from the configured sources.
pub fn collect_paths(config: &SiteConfig) -> PathCollection {
    let mut paths = PathSet::default();

    if let Some(db) = &config.content.database {
        match read_rows(db, &config.content.types) {
            Ok(rows) => {
                debug!("collect"; "{} from {}", plural_count(rows.len(), "row"), db.display());
                rows.iter().for_each(|row| add_row(&mut paths, row));
            }
            Err(err) => log!("collect"; "{err}, skipping"),
        }
    }

    let map = match DataTree::scan(&config.content.data) {
        Ok(tree) => {
            add_tree(&mut paths, &tree);
            SiteMap::from(&tree)
        }
        Err(err) => {
            log!("collect"; "{err}, skipping");
            SiteMap::default()
        }
    };

    debug!("collect"; "{} collected", plural_count(paths.len(), "path"));

    PathCollection {
        paths: paths.into_vec(),
        map,
    }
}

fn add_row(paths: &mut PathSet, row: &ContentRow) {
    if let Some(category) = &row.category {
        paths.segments(&[&row.table, category, &row.slug]);
    }
    paths.segments(&[&row.table, &row.slug]);
    paths.segments(&[&row.slug]);
}

fn add_tree(paths: &mut PathSet, tree: &DataTree) {
    for (role, folder, file) in tree.files() {
        let value = match DATA_CACHE.load(file) {
            Ok(value) => value,
            Err(err) => {
                log!("collect"; "{err}, skipping");
                continue;
            }
        };

        let shape = DataShape::detect(&value);
        if !shape.is_known() {
            debug!("collect"; "unrecognized shape in {}, skipping", file.display());
            continue;
        }

        match (role, folder) {
            (FileRole::Root, _) | (_, None) => shape.records().for_each(|r| add_root_record(paths, &r)),
            (FileRole::Categories, Some(kind)) => shape
                .records()
                .filter_map(|r| r.definition_slug())
                .for_each(|slug| {
                    paths.segments(&[kind, &slug]);
                    paths.segments(&["category", &slug]);
                }),
            (FileRole::Tags, Some(_)) => shape
                .records()
                .filter_map(|r| r.definition_slug())
                .for_each(|slug| paths.segments(&["tag", &slug])),
            (FileRole::Content, Some(kind)) => {
                shape.records().for_each(|r| add_content_record(paths, kind, &r))
            }
        }
    }

    for kind in tree.folders.keys() {
        paths.segments(&[kind]);
    }
}

fn add_root_record(paths: &mut PathSet, record: &Record) {
    if let Some(explicit) = record.explicit_path() {
        paths.raw(explicit);
    } else if let Some(slug) = record.slug() {
        paths.segments(&[slug]);
    }
}

fn add_content_record(paths: &mut PathSet, kind: &str, record: &Record) {
    if let Some(explicit) = record.explicit_path() {
        paths.raw(explicit);
    }

    let categories = record.category_slugs();

    if let Some(slug) = record.slug() {
        if let Some(category) = categories.first() {
            paths.segments(&[kind, category, slug]);
        }
        paths.segments(&[kind, slug]);
        paths.segments(&[slug]);
    }

    for category in &categories {
        paths.segments(&[kind, category]);
        paths.segments(&["category", category]);
    }
    for tag in record.tag_slugs() {
        paths.segments(&["tag", &tag]);
    }
}

// ============================================================================
// tests
// ============================================================================
