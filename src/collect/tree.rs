//! Layout of the JSON data directory.
//!
//! ```text
//! data/
//! ├── about.json            # root file (site page)
//! └── essays/               # content-type folder
//!     ├── categories.json   # category definitions
//!     ├── tags.json         # tag definitions
//!     └── essays.json       # content records (any other name)
//! ```

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use jwalk::WalkDir;

use super::DataError;

pub const CATEGORIES_FILE: &str = "categories.json";
pub const TAGS_FILE: &str = "tags.json";

/// What a data file holds, decided by where it lives and its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileRole {
    Root,
    Categories,
    Tags,
    Content,
}

/// Files of one content-type folder.
#[derive(Debug, Default, Clone)]
pub struct Folder {
    pub categories: Option<PathBuf>,
    pub tags: Option<PathBuf>,
    pub content: Vec<PathBuf>,
}

impl Folder {
    fn add(&mut self, path: PathBuf) {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(CATEGORIES_FILE) => self.categories = Some(path),
            Some(TAGS_FILE) => self.tags = Some(path),
            _ => self.content.push(path),
        }
    }

    /// Every file with its role: definitions first, then content.
    pub fn files(&self) -> impl Iterator<Item = (FileRole, &Path)> {
        let categories = self
            .categories
            .as_deref()
            .map(|p| (FileRole::Categories, p));
        let tags = self.tags.as_deref().map(|p| (FileRole::Tags, p));
        categories
            .into_iter()
            .chain(tags)
            .chain(self.content.iter().map(|p| (FileRole::Content, p.as_path())))
    }
}

#[derive(Debug, Default, Clone)]
pub struct DataTree {
    pub root: PathBuf,
    pub root_files: Vec<PathBuf>,
    pub folders: BTreeMap<String, Folder>,
}

impl DataTree {
    /// Walk `data_dir` two levels deep, sorted by name. Hidden entries and
    /// non-JSON files are ignored.
    pub fn scan(data_dir: &Path) -> Result<Self, DataError> {
        if !data_dir.is_dir() {
            return Err(DataError::Io(
                data_dir.to_path_buf(),
                io::Error::new(io::ErrorKind::NotFound, "data directory not found"),
            ));
        }

        let mut tree = Self {
            root: data_dir.to_path_buf(),
            ..Self::default()
        };

        let entries = WalkDir::new(data_dir)
            .max_depth(2)
            .sort(true)
            .skip_hidden(false)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.depth > 0 && !e.file_name().to_string_lossy().starts_with('.'));

        for entry in entries {
            let path = entry.path();
            match entry.depth {
                1 if entry.file_type().is_dir() => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    tree.folders.entry(name).or_default();
                }
                1 if is_json(&path) => tree.root_files.push(path),
                2 if is_json(&path) => {
                    let Some(folder) = path
                        .parent()
                        .and_then(Path::file_name)
                        .map(|n| n.to_string_lossy().into_owned())
                    else {
                        continue;
                    };
                    if folder.starts_with('.') {
                        continue;
                    }
                    tree.folders.entry(folder).or_default().add(path);
                }
                _ => {}
            }
        }

        Ok(tree)
    }

    /// Every data file with its role and owning folder (`None` for root files).
    pub fn files(&self) -> impl Iterator<Item = (FileRole, Option<&str>, &Path)> {
        let root = self
            .root_files
            .iter()
            .map(|p| (FileRole::Root, None, p.as_path()));
        let folders = self.folders.iter().flat_map(|(name, folder)| {
            folder
                .files()
                .map(move |(role, path)| (role, Some(name.as_str()), path))
        });
        root.chain(folders)
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }
}

fn is_json(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}
