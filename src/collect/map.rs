//! Site map: which data files exist and what each folder defines.

use std::collections::BTreeMap;

use serde::Serialize;

use super::tree::DataTree;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMap {
    pub root_files: Vec<String>,
    pub folders: BTreeMap<String, FolderInfo>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    pub files: Vec<String>,
    /// At least one content file.
    pub has_posts: bool,
    pub has_tags: bool,
    pub has_categories: bool,
}

impl From<&DataTree> for SiteMap {
    fn from(tree: &DataTree) -> Self {
        let root_files = tree.root_files.iter().map(|p| file_name(p)).collect();

        let folders = tree
            .folders
            .iter()
            .map(|(name, folder)| {
                let mut files: Vec<String> = folder.files().map(|(_, p)| file_name(p)).collect();
                files.sort();
                let info = FolderInfo {
                    files,
                    has_posts: !folder.content.is_empty(),
                    has_tags: folder.tags.is_some(),
                    has_categories: folder.categories.is_some(),
                };
                (name.clone(), info)
            })
            .collect();

        Self {
            root_files,
            folders,
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
