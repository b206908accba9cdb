//! Token sources feeding the parser.
//!
//! The parser only needs a forward-only stream of element starts, element
//! ends and text. [`XmlTokenSource`] provides one over an in-memory string
//! using quick-xml.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Error reported by a token source (bad XML, bad encoding, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SourceError(pub String);

/// Kind of the current token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Opening tag; name and attributes are available
    ElementStart,

    /// Closing tag; the name is available
    ElementEnd,

    /// Text or CDATA content
    Text,

    /// Comments, processing instructions, declarations
    Other,

    /// No more tokens
    EndOfDocument,
}

/// A forward-only stream of XML tokens.
pub trait TokenSource {
    /// Move to the next token and return its kind.
    fn advance(&mut self) -> Result<TokenKind, SourceError>;

    /// Kind of the current token.
    fn kind(&self) -> TokenKind;

    /// Element name of the current start or end token.
    fn element_name(&self) -> &str;

    /// Attribute of the current start token.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Content of the current text token.
    fn text(&self) -> &str;

    /// Line of the current token, if tracked.
    fn line(&self) -> Option<usize>;
}

/// quick-xml backed token source over a string.
///
/// Empty elements (`<a/>`) are reported as a start token followed by an end
/// token. Whitespace-only text is dropped.
pub struct XmlTokenSource<'a> {
    reader: Reader<&'a [u8]>,
    input: &'a [u8],
    kind: TokenKind,
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    line: usize,
    scanned: usize,
}

impl<'a> XmlTokenSource<'a> {
    pub fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        let config = reader.config_mut();
        config.trim_text(true);
        config.expand_empty_elements = true;

        Self {
            reader,
            input: xml.as_bytes(),
            kind: TokenKind::Other,
            name: String::new(),
            attributes: Vec::new(),
            text: String::new(),
            line: 1,
            scanned: 0,
        }
    }

    fn update_line(&mut self) {
        let position = (self.reader.buffer_position() as usize).min(self.input.len());
        if position > self.scanned {
            self.line += self.input[self.scanned..position]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.scanned = position;
        }
    }

    fn read_start(&mut self, start: &BytesStart) -> Result<(), SourceError> {
        self.name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        self.attributes.clear();
        for attr in start.attributes() {
            let attr = attr.map_err(|err| SourceError(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| SourceError(err.to_string()))?
                .into_owned();
            self.attributes.push((key, value));
        }
        Ok(())
    }
}

impl TokenSource for XmlTokenSource<'_> {
    fn advance(&mut self) -> Result<TokenKind, SourceError> {
        let event = self.reader.read_event();
        self.update_line();

        self.kind = match event {
            Ok(Event::Start(start)) | Ok(Event::Empty(start)) => {
                self.read_start(&start)?;
                TokenKind::ElementStart
            }
            Ok(Event::End(end)) => {
                self.name = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
                TokenKind::ElementEnd
            }
            Ok(Event::Text(text)) => {
                self.text = text
                    .unescape()
                    .map_err(|err| SourceError(err.to_string()))?
                    .into_owned();
                TokenKind::Text
            }
            Ok(Event::CData(data)) => {
                self.text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                TokenKind::Text
            }
            Ok(Event::Eof) => TokenKind::EndOfDocument,
            Ok(_) => TokenKind::Other,
            Err(err) => return Err(SourceError(err.to_string())),
        };
        Ok(self.kind)
    }

    fn kind(&self) -> TokenKind {
        self.kind
    }

    fn element_name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn line(&self) -> Option<usize> {
        Some(self.line)
    }
}
