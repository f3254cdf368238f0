//! Scan report types and Markdown formatting.

use std::fmt::Write;

use super::{CrossFileDuplicate, FileFix, SlugKind, UndefinedRef};
use crate::utils::plural_count;

/// Everything a scan found.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Files with within-file duplicates, relative to the data directory.
    pub fixes: Vec<FileFix>,
    pub duplicates: Vec<CrossFileDuplicate>,
    pub undefined: Vec<UndefinedRef>,
    /// Files that could not be read, parsed, or rewritten.
    pub errors: Vec<String>,
    /// Within-file fixes were computed but not written.
    pub dry_run: bool,
}

impl ScanReport {
    pub fn removed_count(&self) -> usize {
        self.fixes.iter().map(|f| f.removed.len()).sum()
    }

    /// One-line summary for the terminal.
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "would remove" } else { "removed" };
        format!(
            "{verb} {} in {}, {} across files, {}",
            plural_count(self.removed_count(), "duplicate"),
            plural_count(self.fixes.len(), "file"),
            plural_count(self.duplicates.len(), "slug"),
            plural_count(self.undefined.len(), "undefined reference"),
        )
    }

    /// Render the full Markdown report.
    pub fn to_markdown(&self) -> String {
        let mut md = String::from("# Data Consistency Report\n");
        if self.dry_run {
            md.push_str("\n_Dry run: data files were not modified._\n");
        }

        self.write_fixes(&mut md);
        self.write_duplicates(&mut md);
        self.write_undefined(&mut md);
        self.write_errors(&mut md);
        md
    }

    fn write_fixes(&self, md: &mut String) {
        md.push_str("\n## Within-file duplicates (fixed)\n\n");
        if self.fixes.is_empty() {
            md.push_str("No duplicates found.\n");
            return;
        }

        for fix in &self.fixes {
            let _ = writeln!(
                md,
                "### `{}` ({} removed)\n",
                fix.file.display(),
                fix.removed.len()
            );
            md.push_str("| Slug | Removed title | Kept title |\n");
            md.push_str("|------|---------------|------------|\n");
            for entry in &fix.removed {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} |",
                    cell(&entry.slug),
                    cell(entry.removed_title.as_deref().unwrap_or("")),
                    cell(entry.kept_title.as_deref().unwrap_or("")),
                );
            }
            md.push('\n');
        }
    }

    fn write_duplicates(&self, md: &mut String) {
        md.push_str("\n## Cross-file duplicates\n\n");
        if self.duplicates.is_empty() {
            md.push_str("No duplicates found.\n");
            return;
        }

        for kind in [SlugKind::Category, SlugKind::Tag, SlugKind::Content] {
            let group: Vec<_> = self.duplicates.iter().filter(|d| d.kind == kind).collect();
            if group.is_empty() {
                continue;
            }

            let _ = writeln!(md, "### {}\n", capitalize(kind.label()));
            md.push_str("| Slug | Defined in |\n");
            md.push_str("|------|------------|\n");
            for duplicate in group {
                let locations = duplicate
                    .locations
                    .iter()
                    .map(|l| match &l.title {
                        Some(title) => format!("`{}` ({})", l.file, title),
                        None => format!("`{}`", l.file),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(md, "| {} | {} |", cell(&duplicate.slug), cell(&locations));
            }
            md.push('\n');
        }
    }

    fn write_undefined(&self, md: &mut String) {
        md.push_str("\n## Undefined references\n\n");
        if self.undefined.is_empty() {
            md.push_str("No undefined references found.\n");
            return;
        }

        md.push_str("| Folder | Kind | Slug | Uses | Example files |\n");
        md.push_str("|--------|------|------|------|---------------|\n");
        for r in &self.undefined {
            let examples = r
                .examples
                .iter()
                .map(|f| format!("`{f}`"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                md,
                "| {} | {} | {} | {} | {} |",
                cell(&r.folder),
                r.kind,
                cell(&r.slug),
                r.count,
                cell(&examples)
            );
        }
    }

    fn write_errors(&self, md: &mut String) {
        if self.errors.is_empty() {
            return;
        }
        md.push_str("\n## Skipped files\n\n");
        for err in &self.errors {
            let _ = writeln!(md, "- {}", err.replace('\n', " "));
        }
    }
}

/// Escape a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
