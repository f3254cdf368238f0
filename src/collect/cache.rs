//! Process-wide cache of parsed JSON files.
//!
//! Entries are keyed by path and revalidated against the file's modification
//! time and length on every `load`, so a long-running server only reparses
//! files that actually changed.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock},
    time::SystemTime,
};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::Value;

use super::DataError;

/// Global parsed-JSON cache instance.
pub static DATA_CACHE: LazyLock<DataCache> = LazyLock::new(DataCache::new);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: SystemTime,
    len: u64,
}

impl Stamp {
    fn of(path: &Path) -> Result<Self, DataError> {
        let meta = fs::metadata(path).map_err(|e| DataError::Io(path.to_path_buf(), e))?;
        let modified = meta
            .modified()
            .map_err(|e| DataError::Io(path.to_path_buf(), e))?;
        Ok(Self {
            modified,
            len: meta.len(),
        })
    }
}

struct Entry {
    stamp: Stamp,
    value: Arc<Value>,
}

/// Parsed JSON documents keyed by file path (thread-safe).
pub struct DataCache {
    entries: RwLock<FxHashMap<PathBuf, Entry>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Return the parsed document for `path`, reading it if missing or stale.
    pub fn load(&self, path: &Path) -> Result<Arc<Value>, DataError> {
        let stamp = Stamp::of(path)?;

        if let Some(entry) = self.entries.read().get(path)
            && entry.stamp == stamp
        {
            return Ok(Arc::clone(&entry.value));
        }

        let value = Arc::new(read_json(path)?);
        self.entries.write().insert(
            path.to_path_buf(),
            Entry {
                stamp,
                value: Arc::clone(&value),
            },
        );
        Ok(value)
    }

    /// Drop every cached document.
    pub fn reset(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }
}

impl Default for DataCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and parse a JSON file without caching.
pub fn read_json(path: &Path) -> Result<Value, DataError> {
    let content = fs::read_to_string(path).map_err(|e| DataError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| DataError::Json(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_caches_document() {
        let cache = DataCache::new();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tags.json");
        fs::write(&path, r#"[{"slug":"rust"}]"#).unwrap();

        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_load_reparses_changed_file() {
        let cache = DataCache::new();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tags.json");
        fs::write(&path, r#"[{"slug":"rust"}]"#).unwrap();
        cache.load(&path).unwrap();

        fs::write(&path, r#"[{"slug":"rust"},{"slug":"go"}]"#).unwrap();
        let value = cache.load(&path).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_reset() {
        let cache = DataCache::new();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.json");
        fs::write(&path, "{}").unwrap();
        cache.load(&path).unwrap();

        cache.reset();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_load_errors() {
        let cache = DataCache::new();
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(cache.load(&missing), Err(DataError::Io(..))));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(cache.load(&broken), Err(DataError::Json(..))));
        assert_eq!(cache.len(), 0);
    }
}
