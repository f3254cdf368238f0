//! `[content]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [content]
//! data = "data"                 # JSON content tree
//! database = "content.db"       # optional SQLite database
//! types = ["essays", "blog", "notes", "papers", "reviews"]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the JSON content files.
    pub data: PathBuf,

    /// SQLite database with one table per content type. Opened read-only.
    pub database: Option<PathBuf>,

    /// Content types; each names a database table.
    pub types: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            data: "data".into(),
            database: None,
            types: ["essays", "blog", "notes", "papers", "reviews"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ContentConfig {
    const DATA: FieldPath = FieldPath::new("content.data");
    const TYPES: FieldPath = FieldPath::new("content.types");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.data.is_dir() {
            diag.warn(
                Self::DATA,
                format!("`{}` is not a directory, no JSON content will be read", self.data.display()),
            );
        }

        for name in &self.types {
            if !is_identifier(name) {
                diag.error_with_hint(
                    Self::TYPES,
                    format!("`{name}` is not a valid table name"),
                    "use letters, digits and `_` only",
                );
            }
        }
    }
}

/// Plain SQL identifier: `[A-Za-z0-9_]+`.
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
