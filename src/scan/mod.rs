//! Data consistency scanner.
//!
//! # Phases
//!
//! 1. **Within-file**: entries repeating an earlier slug are removed and the
//!    file is rewritten (skipped on dry runs).
//! 2. **Cross-file**: slugs defined in several files of the same kind are
//!    reported. Files are never touched for these.
//! 3. **Undefined references**: inline categories/tags of content records
//!    that the folder's `categories.json`/`tags.json` does not define.
//!
//! Phases 2 and 3 see the deduplicated documents.

mod conflict;
mod dedup;
mod refs;
mod report;

pub use conflict::{CrossFileDuplicate, SlugKind, SlugSources};
pub use dedup::{FileFix, RemovedEntry, fix_document, write_document};
pub use refs::{FolderRefs, UndefinedRef};
pub use report::ScanReport;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::collect::{DataError, DataShape, DataTree, FileRole, Record, read_json};
use crate::utils::path::relative_display;
use crate::utils::plural_count;
use crate::{debug, log};

/// Scan the data directory, fixing within-file duplicates unless `dry_run`.
///
/// Only a missing or unreadable data directory is an error; problems with
/// single files are collected into [`ScanReport::errors`].
pub fn run_scan(data_dir: &Path, dry_run: bool) -> Result<ScanReport, DataError> {
    let tree = DataTree::scan(data_dir)?;
    debug!("dupes"; "scanning {}", plural_count(tree.file_count(), "file"));
    let mut report = ScanReport {
        dry_run,
        ..ScanReport::default()
    };

    let mut sources = SlugSources::default();
    let mut folder_refs: BTreeMap<&str, FolderRefs> = BTreeMap::new();

    for (role, folder, file) in tree.files() {
        let display = relative_display(file, &tree.root);

        let mut value = match read_json(file) {
            Ok(value) => value,
            Err(err) => {
                log!("warning"; "{err}");
                report.errors.push(err.to_string());
                continue;
            }
        };

        let removed = fix_document(&mut value);
        if !removed.is_empty() {
            log!("fix"; "{}: {}", display, plural_count(removed.len(), "duplicate"));
            record_fix(&mut report, file, &display, &value, removed);
        }

        let shape = DataShape::detect(&value);
        if !shape.is_known() {
            debug!("dupes"; "unrecognized shape in {}, skipping", display);
            continue;
        }
        let records: Vec<Record> = shape.records().collect();

        let Some(folder) = folder else {
            continue;
        };
        let refs = folder_refs.entry(folder).or_default();
        match role {
            FileRole::Categories => {
                sources.add_file(SlugKind::Category, &display, &records);
                refs.categories.define(&records);
            }
            FileRole::Tags => {
                sources.add_file(SlugKind::Tag, &display, &records);
                refs.tags.define(&records);
            }
            FileRole::Content => {
                sources.add_file(SlugKind::Content, &display, &records);
                for record in &records {
                    refs.use_record(record, &display);
                }
            }
            FileRole::Root => {}
        }
    }

    report.duplicates = sources.detect();
    report.undefined = folder_refs
        .iter()
        .flat_map(|(folder, refs)| refs.undefined(folder))
        .collect();

    Ok(report)
}

/// Write the fixed document and list it in the report.
///
/// A file that cannot be written is reported as an error instead.
fn record_fix(
    report: &mut ScanReport,
    file: &Path,
    display: &str,
    value: &Value,
    removed: Vec<RemovedEntry>,
) {
    if !report.dry_run
        && let Err(err) = write_document(file, value)
    {
        log!("error"; "{err}");
        report.errors.push(err.to_string());
        return;
    }
    report.fixes.push(FileFix {
        file: PathBuf::from(display),
        removed,
    });
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_within_file_fix_rewrites() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "essays/essays.json",
            r#"{"posts": [{"slug": "a", "title": "A"}, {"slug": "b"}, {"slug": "a", "title": "A2"}]}"#,
        );

        let report = run_scan(dir.path(), false).unwrap();
        assert_eq!(report.removed_count(), 1);
        assert_eq!(report.fixes[0].file, PathBuf::from("essays/essays.json"));

        let rewritten = read_json(&dir.path().join("essays/essays.json")).unwrap();
        assert_eq!(rewritten["posts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_fix_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "tags.json", r#"[{"slug": "a"}, {"slug": "b"}, {"slug": "a"}]"#);

        let first = run_scan(dir.path(), false).unwrap();
        assert_eq!(first.removed_count(), 1);
        let after_first = fs::read_to_string(dir.path().join("tags.json")).unwrap();

        let second = run_scan(dir.path(), false).unwrap();
        assert_eq!(second.removed_count(), 0);
        assert_eq!(
            fs::read_to_string(dir.path().join("tags.json")).unwrap(),
            after_first
        );
    }

    #[test]
    fn test_dry_run_leaves_files() {
        let dir = TempDir::new().unwrap();
        let original = r#"[{"slug": "a"}, {"slug": "a"}]"#;
        write(dir.path(), "blog/posts.json", original);

        let report = run_scan(dir.path(), true).unwrap();
        assert_eq!(report.removed_count(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("blog/posts.json")).unwrap(),
            original
        );
    }

    #[test]
    fn test_clean_file_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let original = r#"[{"slug":"a"},{"slug":"b"}]"#;
        write(dir.path(), "blog/posts.json", original);

        let report = run_scan(dir.path(), false).unwrap();
        assert!(report.fixes.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("blog/posts.json")).unwrap(),
            original
        );
    }

    #[test]
    fn test_cross_file_reported_not_modified() {
        let dir = TempDir::new().unwrap();
        let essays = r#"[{"slug": "x", "title": "X"}]"#;
        let notes = r#"[{"slug": "x", "title": "X (notes)"}]"#;
        write(dir.path(), "essays/categories.json", essays);
        write(dir.path(), "notes/categories.json", notes);

        let report = run_scan(dir.path(), false).unwrap();
        assert_eq!(report.duplicates.len(), 1);
        let files: Vec<_> = report.duplicates[0]
            .locations
            .iter()
            .map(|l| l.file.as_str())
            .collect();
        assert_eq!(files, ["essays/categories.json", "notes/categories.json"]);

        assert_eq!(
            fs::read_to_string(dir.path().join("essays/categories.json")).unwrap(),
            essays
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("notes/categories.json")).unwrap(),
            notes
        );
    }

    #[test]
    fn test_cross_file_with_mistyped_fields() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "essays/categories.json", r#"[{"slug": "x"}]"#);
        write(
            dir.path(),
            "notes/categories.json",
            r#"[{"slug": "x", "title": "X", "name": 12}]"#,
        );
        write(dir.path(), "notes/notes.json", r#"[{"slug": "n1", "title": 5, "category": "y"}]"#);

        let report = run_scan(dir.path(), true).unwrap();
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.duplicates[0].slug, "x");
        assert_eq!(report.undefined.len(), 1);
        assert_eq!(report.undefined[0].slug, "y");
    }

    #[test]
    fn test_undefined_references() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "notes/tags.json", r#"[{"slug": "rust"}]"#);
        write(
            dir.path(),
            "notes/notes.json",
            r#"[{"slug": "n1", "tags": ["rust", "zig"], "category": "Systems"}]"#,
        );

        let report = run_scan(dir.path(), true).unwrap();
        assert_eq!(report.undefined.len(), 1);
        assert_eq!(report.undefined[0].slug, "zig");
        assert_eq!(report.undefined[0].kind, SlugKind::Tag);
        assert_eq!(report.undefined[0].examples, ["notes/notes.json"]);
    }

    #[test]
    fn test_bad_file_collected_as_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "blog/broken.json", "{ nope");
        write(dir.path(), "blog/posts.json", r#"[{"slug": "a"}]"#);

        let report = run_scan(dir.path(), false).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("broken.json"));
    }

    #[test]
    fn test_unwritable_fix_not_listed() {
        let dir = TempDir::new().unwrap();
        let removed = vec![RemovedEntry {
            slug: "a".into(),
            removed_title: None,
            kept_title: None,
        }];
        let mut report = ScanReport::default();

        // a directory cannot be written as a file
        record_fix(&mut report, dir.path(), "blog", &serde_json::json!([]), removed.clone());
        assert!(report.fixes.is_empty());
        assert_eq!(report.errors.len(), 1);

        report.dry_run = true;
        record_fix(&mut report, dir.path(), "blog", &serde_json::json!([]), removed);
        assert_eq!(report.fixes.len(), 1);
    }

    #[test]
    fn test_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        assert!(run_scan(&dir.path().join("data"), false).is_err());
    }
}
