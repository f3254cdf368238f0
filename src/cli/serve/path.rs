//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

use crate::core::decode_request_path;

/// Resolve URL to a file under `serve_root`, handling index.html for
/// directories. Anything escaping the root resolves to `None`.
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let decoded = decode_request_path(url);
    let clean = decoded.trim_matches('/');

    if clean.split('/').any(|segment| segment == "..") {
        return None;
    }

    let local = serve_root.join(clean);

    // canonicalize resolves symlinks; the result must stay under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public/blog")).unwrap();
        fs::write(dir.path().join("public/index.html"), "home").unwrap();
        fs::write(dir.path().join("public/blog/index.html"), "blog").unwrap();
        fs::write(dir.path().join("public/my file.txt"), "x").unwrap();
        fs::write(dir.path().join("secret.txt"), "no").unwrap();
        dir
    }

    #[test]
    fn test_resolve_index_and_files() {
        let dir = site();
        let root = dir.path().join("public");

        assert!(resolve_path("/", &root).unwrap().ends_with("public/index.html"));
        assert!(resolve_path("/blog/", &root).unwrap().ends_with("blog/index.html"));
        assert!(resolve_path("/blog?page=2", &root).unwrap().ends_with("blog/index.html"));
        assert!(resolve_path("/my%20file.txt", &root).is_some());
    }

    #[test]
    fn test_resolve_missing() {
        let dir = site();
        assert!(resolve_path("/nope", &dir.path().join("public")).is_none());
    }

    #[test]
    fn test_rejects_traversal() {
        let dir = site();
        let root = dir.path().join("public");
        assert!(resolve_path("/../secret.txt", &root).is_none());
        assert!(resolve_path("/%2e%2e/secret.txt", &root).is_none());
    }
}
