//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Default limit on nested `<node>` elements.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for a single parse.
///
/// Deserializes with defaults for missing fields, so a host application can
/// embed it in its own configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Name reported in error messages
    pub file_name: String,

    /// Maximum node nesting before `ExcessiveNesting` is raised
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            file_name: "<memory>".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserOptions {
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert_eq!(options.file_name, "<memory>");
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let options: ParserOptions = serde_json::from_str(r#"{ "max_depth": 8 }"#).unwrap();
        assert_eq!(options, ParserOptions::default().with_max_depth(8));
    }
}
