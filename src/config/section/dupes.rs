//! `[dupes]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [dupes]
//! report = "reports/duplicates.md"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DupesConfig {
    /// Where the Markdown consistency report is written.
    pub report: PathBuf,
}

impl Default for DupesConfig {
    fn default() -> Self {
        Self {
            report: "reports/duplicates.md".into(),
        }
    }
}
