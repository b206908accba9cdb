//! Parse errors.

use thiserror::Error;

/// What went wrong while reading a document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    #[error("missing text content in <{element}>")]
    MissingContent { element: String },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("duplicate id '{0}'")]
    DuplicateId(String),

    #[error("unresolved reference '#{0}'")]
    UnresolvedReference(String),

    #[error("nesting depth {depth} exceeds the maximum of {max}")]
    ExcessiveNesting { depth: usize, max: usize },

    #[error("invalid number '{0}'")]
    NumericFormat(String),
}

/// A parse failure with its location.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{file}{}: {kind}", line_suffix(.line))]
pub struct ParseError {
    /// File name from the parser options
    pub file: String,

    /// Line of the offending token, if the token source tracks lines
    pub line: Option<usize>,

    pub kind: ErrorKind,
}

impl ParseError {
    pub fn new(file: impl Into<String>, line: Option<usize>, kind: ErrorKind) -> Self {
        Self {
            file: file.into(),
            line,
            kind,
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(":{line}"),
        None => String::new(),
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let err = ParseError::new("cube.dae", Some(12), ErrorKind::DuplicateId("node1".into()));
        assert_eq!(err.to_string(), "cube.dae:12: duplicate id 'node1'");
    }

    #[test]
    fn test_display_without_line() {
        let err = ParseError::new(
            "<memory>",
            None,
            ErrorKind::MissingAttribute {
                element: "float_array".into(),
                attribute: "id".into(),
            },
        );
        assert_eq!(err.to_string(), "<memory>: missing attribute 'id' on <float_array>");
    }
}
