//! Conversion options
//!
//! Options are plain data. The CLI builds them from flags or from a JSON file;
//! library callers construct them directly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default recursion limit for lowering and rendering
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Switches that shape the assembled output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Prepend the `// Code generated. MUST EDIT!` banner
    pub add_head_comment_block: bool,
    /// Prepend helper code contributed by hooks
    pub add_additional_code: bool,
    /// Maximum nesting depth before the conversion fails
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            add_head_comment_block: true,
            add_additional_code: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConvertOptions {
    /// Options producing only the converted body
    pub fn body_only() -> Self {
        Self {
            add_head_comment_block: false,
            add_additional_code: false,
            ..Self::default()
        }
    }

    /// Parse options from JSON text; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        let options: ConvertOptions =
            serde_json::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        if options.max_depth == 0 {
            return Err(Error::config("max_depth must be greater than zero"));
        }
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = ConvertOptions::from_json(r#"{ "add_head_comment_block": false }"#).unwrap();
        assert!(!options.add_head_comment_block);
        assert!(options.add_additional_code);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let err = ConvertOptions::from_json(r#"{ "max_depth": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            ConvertOptions::from_json("{ nope"),
            Err(Error::Config { .. })
        ));
    }
}
