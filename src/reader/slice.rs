//! Zero-Copy Slice Reader
//!
//! Turns tokens from a byte slice into element events. Names and
//! entity-free text stay borrowed from the input.

use super::events::{EndElement, StartElement, XmlEvent};
use crate::core::attributes::{parse_attributes, Attribute};
use crate::core::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::MarkupError;

/// Zero-copy XML reader from a byte slice
pub struct SliceReader<'a> {
    tokenizer: Tokenizer<'a>,
    error: Option<MarkupError>,
}

impl<'a> SliceReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        SliceReader {
            tokenizer: Tokenizer::new(input),
            error: None,
        }
    }

    /// The syntax error that stopped reading, if any
    pub fn error(&self) -> Option<&MarkupError> {
        self.error.as_ref().or_else(|| self.tokenizer.error())
    }

    /// Take the error out of the reader
    pub fn take_error(&mut self) -> Option<MarkupError> {
        self.error.take().or_else(|| self.tokenizer.take_error())
    }

    /// Get the next XML event, or None once input ends or an error is recorded
    pub fn next_event(&mut self) -> Option<XmlEvent<'a>> {
        if self.error.is_some() {
            return None;
        }

        loop {
            let token = self.tokenizer.next_token()?;

            match token.kind {
                TokenKind::Eof => return Some(XmlEvent::EndDocument),

                TokenKind::StartTag => {
                    let start = self.start_element(&token)?;
                    return Some(XmlEvent::StartElement(start));
                }

                TokenKind::EmptyTag => {
                    let start = self.start_element(&token)?;
                    return Some(XmlEvent::EmptyElement(start));
                }

                TokenKind::EndTag => {
                    return Some(XmlEvent::EndElement(EndElement::new(token.name?)));
                }

                TokenKind::Text => {
                    if let Some(content) = token.content.filter(|c| !c.is_empty()) {
                        return Some(XmlEvent::Text(content));
                    }
                }

                TokenKind::CData => {
                    if let Some(content) = token.content {
                        return Some(XmlEvent::CData(content));
                    }
                }

                TokenKind::Comment
                | TokenKind::ProcessingInstruction
                | TokenKind::XmlDeclaration
                | TokenKind::DocType => {}
            }
        }
    }

    fn start_element(&mut self, token: &Token<'a>) -> Option<StartElement<'a>> {
        let name = token.name?;
        let attrs = self.parse_tag_attributes(token)?;
        Some(StartElement::new(name, token.span.0, attrs))
    }

    /// Parse attributes from a tag token, recording an error on failure
    fn parse_tag_attributes(&mut self, token: &Token<'a>) -> Option<Vec<Attribute<'a>>> {
        let Some(raw) = token.attrs else {
            return Some(Vec::new());
        };

        match parse_attributes(raw) {
            Ok(attrs) => Some(attrs),
            Err((message, offset)) => {
                // Offset is relative to the attribute section, which starts after '<' and the name
                let name_len = token.name.map_or(0, <[u8]>::len);
                let position = token.span.0 + 1 + name_len + offset;
                self.error = Some(MarkupError::syntax(position, message));
                None
            }
        }
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = XmlEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event()? {
            XmlEvent::EndDocument => None,
            event => Some(event),
        }
    }
}
