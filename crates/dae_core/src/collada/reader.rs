//! Primitive reading operations shared by all element readers.
//!
//! Every element reader is entered positioned on its start token and must
//! return positioned on its matching end token.

use super::error::{ErrorKind, ParseError, ParseResult};
use super::parser::ColladaParser;
use super::source::{TokenKind, TokenSource};

/// Strip the leading `#` of a local URI reference.
pub(super) fn strip_fragment(url: &str) -> &str {
    url.strip_prefix('#').unwrap_or(url)
}

impl<S: TokenSource> ColladaParser<S> {
    /// Build an error at the current position.
    pub(super) fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(self.options.file_name.clone(), self.source.line(), kind)
    }

    fn malformed(&self, message: String) -> ParseError {
        self.error(ErrorKind::MalformedDocument(message))
    }

    pub(super) fn advance(&mut self) -> ParseResult<TokenKind> {
        if self.held {
            self.held = false;
            return Ok(self.source.kind());
        }
        self.source
            .advance()
            .map_err(|err| self.malformed(err.to_string()))
    }

    /// Value of a required attribute on the current element.
    pub(super) fn require_attribute(&self, name: &str) -> ParseResult<String> {
        match self.source.attribute(name) {
            Some(value) => Ok(value.to_string()),
            None => Err(self.error(ErrorKind::MissingAttribute {
                element: self.source.element_name().to_string(),
                attribute: name.to_string(),
            })),
        }
    }

    /// Value of an optional attribute on the current element.
    pub(super) fn optional_attribute(&self, name: &str) -> Option<String> {
        self.source.attribute(name).map(str::to_string)
    }

    /// Optional non-negative integer attribute.
    pub(super) fn optional_count(&self, name: &str) -> ParseResult<Option<usize>> {
        match self.source.attribute(name) {
            Some(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| self.error(ErrorKind::NumericFormat(value.to_string()))),
            None => Ok(None),
        }
    }

    pub(super) fn require_count(&self, name: &str) -> ParseResult<usize> {
        let value = self.require_attribute(name)?;
        value
            .trim()
            .parse()
            .map_err(|_| self.error(ErrorKind::NumericFormat(value.clone())))
    }

    /// Text of the current element, with leading whitespace skipped.
    ///
    /// Text runs split by comments or processing instructions are joined with
    /// a space. The first structural token is held back for `verify_closing`.
    pub(super) fn text_content(&mut self) -> ParseResult<String> {
        let element = self.source.element_name().to_string();
        let mut content = String::new();
        loop {
            match self.advance()? {
                TokenKind::Text => {
                    let text = self.source.text().trim();
                    if !text.is_empty() {
                        if !content.is_empty() {
                            content.push(' ');
                        }
                        content.push_str(text);
                    }
                }
                TokenKind::Other => {}
                _ => {
                    self.held = true;
                    break;
                }
            }
        }
        if content.is_empty() {
            return Err(self.error(ErrorKind::MissingContent { element }));
        }
        Ok(content)
    }

    /// Consume up to and including `</name>`.
    ///
    /// Only text and non-structural tokens may come first.
    pub(super) fn verify_closing(&mut self, name: &str) -> ParseResult<()> {
        loop {
            match self.advance()? {
                TokenKind::Text | TokenKind::Other => {}
                TokenKind::ElementEnd if self.source.element_name() == name => return Ok(()),
                TokenKind::ElementEnd => {
                    return Err(self.malformed(format!(
                        "expected </{name}>, found </{}>",
                        self.source.element_name()
                    )))
                }
                TokenKind::ElementStart => {
                    return Err(self.malformed(format!(
                        "expected </{name}>, found <{}>",
                        self.source.element_name()
                    )))
                }
                TokenKind::EndOfDocument => {
                    return Err(self.malformed(format!("unexpected end of document, expected </{name}>")))
                }
            }
        }
    }

    /// Discard the current element and everything nested in it.
    pub(super) fn skip_element(&mut self) -> ParseResult<()> {
        let name = self.source.element_name().to_string();
        log::debug!("Skipping <{}>", name);

        let mut depth = 1usize;
        while depth > 0 {
            match self.advance()? {
                TokenKind::ElementStart => depth += 1,
                TokenKind::ElementEnd => depth -= 1,
                TokenKind::EndOfDocument => {
                    return Err(self.malformed(format!("unexpected end of document inside <{name}>")))
                }
                TokenKind::Text | TokenKind::Other => {}
            }
        }
        Ok(())
    }

    /// Walk the child elements of `parent` until its closing tag.
    ///
    /// `visit` is called on each child start token with the child's name and
    /// must consume the child up to its end token.
    pub(super) fn read_children<F>(&mut self, parent: &str, mut visit: F) -> ParseResult<()>
    where
        F: FnMut(&mut Self, &str) -> ParseResult<()>,
    {
        loop {
            match self.advance()? {
                TokenKind::ElementStart => {
                    let name = self.source.element_name().to_string();
                    visit(self, &name)?;
                }
                TokenKind::ElementEnd => {
                    if self.source.element_name() == parent {
                        return Ok(());
                    }
                    return Err(self.malformed(format!(
                        "expected </{parent}>, found </{}>",
                        self.source.element_name()
                    )));
                }
                TokenKind::EndOfDocument => {
                    return Err(self.malformed(format!("unexpected end of document inside <{parent}>")))
                }
                TokenKind::Text | TokenKind::Other => {}
            }
        }
    }

    /// Parse a whitespace and/or comma separated list of floats.
    pub(super) fn parse_floats(&self, text: &str) -> ParseResult<Vec<f32>> {
        text.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| self.parse_float(token))
            .collect()
    }

    pub(super) fn parse_float(&self, token: &str) -> ParseResult<f32> {
        token
            .trim()
            .parse::<f32>()
            .map_err(|_| self.error(ErrorKind::NumericFormat(token.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::super::options::ParserOptions;
    use super::super::source::XmlTokenSource;
    use super::*;

    /// Parser positioned on the first element of `xml`.
    fn parser_at(xml: &str) -> ColladaParser<XmlTokenSource<'_>> {
        let mut parser = ColladaParser::from_xml(xml, ParserOptions::default());
        assert_eq!(parser.advance().unwrap(), TokenKind::ElementStart);
        parser
    }

    #[test]
    fn test_require_attribute() {
        let parser = parser_at(r#"<source id="pos"/>"#);
        assert_eq!(parser.require_attribute("id").unwrap(), "pos");

        let err = parser.require_attribute("name").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::MissingAttribute {
                element: "source".to_string(),
                attribute: "name".to_string(),
            }
        );
        assert_eq!(parser.optional_attribute("name"), None);
    }

    #[test]
    fn test_text_content_and_closing() {
        let mut parser = parser_at("<up_axis>   Z_UP</up_axis>");
        assert_eq!(parser.text_content().unwrap(), "Z_UP");
        parser.verify_closing("up_axis").unwrap();
    }

    #[test]
    fn test_text_content_joins_runs_split_by_comments() {
        let mut parser = parser_at("<float_array>1 2 3 <!-- split --> 4 5 6<?pi?>7</float_array>");
        assert_eq!(parser.text_content().unwrap(), "1 2 3 4 5 6 7");
        parser.verify_closing("float_array").unwrap();
        assert_eq!(parser.source.kind(), TokenKind::ElementEnd);
    }

    #[test]
    fn test_text_content_missing() {
        let mut parser = parser_at("<up_axis></up_axis>");
        let err = parser.text_content().unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::MissingContent {
                element: "up_axis".to_string()
            }
        );
    }

    #[test]
    fn test_verify_closing_rejects_other_element() {
        let mut parser = parser_at("<translate>1 2 3<extra/></translate>");
        parser.text_content().unwrap();
        let err = parser.verify_closing("translate").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedDocument(_)));
    }

    #[test]
    fn test_skip_element_keeps_siblings_in_sync() {
        let xml = r#"<root>
            <extra><a><b><c>deep</c><c/></b></a><a/></extra>
            <keep id="after"/>
        </root>"#;
        let mut parser = parser_at(xml);
        let mut seen = Vec::new();
        parser
            .read_children("root", |parser, name| {
                if name == "keep" {
                    seen.push(parser.require_attribute("id")?);
                }
                parser.skip_element()
            })
            .unwrap();

        assert_eq!(seen, vec!["after".to_string()]);
        assert_eq!(parser.source.kind(), TokenKind::ElementEnd);
        assert_eq!(parser.source.element_name(), "root");
    }

    #[test]
    fn test_skip_element_unterminated() {
        let mut parser = parser_at("<extra><a>");
        let err = parser.skip_element().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedDocument(_)));
    }

    #[test]
    fn test_parse_floats_mixed_separators() {
        let parser = parser_at("<x/>");
        assert_eq!(parser.parse_floats("1, 2.5\n-3e1\t4").unwrap(), vec![1.0, 2.5, -30.0, 4.0]);

        let err = parser.parse_floats("1 two 3").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NumericFormat("two".to_string()));
    }

    #[test]
    fn test_strip_fragment() {
        assert_eq!(strip_fragment("#vals"), "vals");
        assert_eq!(strip_fragment("vals"), "vals");
    }
}
