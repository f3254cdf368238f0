//! Errors raised while loading a data source.
//!
//! The collector never propagates these: each one becomes a log line and the
//! source contributes nothing. The scanner reports them per file.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),

    #[error("malformed JSON in {}: {}", .0.display(), .1)]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("database error in {}: {}", .0.display(), .1)]
    Database(PathBuf, #[source] rusqlite::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = DataError::Io(
            PathBuf::from("data/essays/essays.json"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("data/essays/essays.json"));
        assert!(msg.contains("gone"));
    }
}
