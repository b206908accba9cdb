//! Entry points for parsing COLLADA documents.

use std::path::Path;

use thiserror::Error;

use super::error::{ParseError, ParseResult};
use super::options::ParserOptions;
use super::parser::ColladaParser;
use super::types::ColladaDocument;

/// Errors that can occur while loading a COLLADA file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Parse a COLLADA document from a string with default options.
pub fn parse_collada(xml: &str) -> ParseResult<ColladaDocument> {
    parse_collada_with(xml, ParserOptions::default())
}

/// Parse a COLLADA document from a string.
pub fn parse_collada_with(xml: &str, options: ParserOptions) -> ParseResult<ColladaDocument> {
    ColladaParser::from_xml(xml, options).parse()
}

/// Load and parse a `.dae` file.
///
/// # Example
///
/// ```ignore
/// use dae_core::collada::load_collada;
///
/// let document = load_collada("scene.dae")?;
/// println!("Up axis: {:?}", document.asset.up_axis);
/// ```
pub fn load_collada<P: AsRef<Path>>(path: P) -> LoadResult<ColladaDocument> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let options = ParserOptions::default().with_file_name(path.to_string_lossy());
    Ok(parse_collada_with(&content, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let err = load_collada("does/not/exist.dae").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_error_carries_file_name() {
        let options = ParserOptions::default().with_file_name("broken.dae");
        let err = parse_collada_with("<COLLADA><asset>", options).unwrap_err();
        assert_eq!(err.file, "broken.dae");
        assert!(err.to_string().starts_with("broken.dae"));
    }
}
