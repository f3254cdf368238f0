//! `[suggest]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [suggest]
//! max_suggestions = 10   # suggestions shown on the 404 page
//! max_distance = 8       # edit distance cut-off
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub max_suggestions: usize,
    pub max_distance: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 10,
            max_distance: 8,
        }
    }
}

impl SuggestConfig {
    const MAX_SUGGESTIONS: FieldPath = FieldPath::new("suggest.max_suggestions");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.max_suggestions == 0 {
            diag.error(Self::MAX_SUGGESTIONS, "must be greater than 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_suggest_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.suggest.max_suggestions, 10);
        assert_eq!(config.suggest.max_distance, 8);
    }

    #[test]
    fn test_zero_suggestions_rejected() {
        let config = test_parse_config("[suggest]\nmax_suggestions = 0");
        let mut diag = ConfigDiagnostics::new();
        config.suggest.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
