//! XML Tokenizer - State machine for XML token extraction
//!
//! Implements a pull-parser style tokenizer that extracts XML tokens:
//! - Element start/end tags
//! - Text content
//! - CDATA sections
//! - Comments
//! - Processing instructions and the XML declaration
//! - DOCTYPE declarations (skipped as a single token)
//!
//! Malformed markup stops the tokenizer; the error is kept and can be read
//! back with [`Tokenizer::error`].

use super::entities::decode_text;
use super::scanner::{is_whitespace, Scanner};
use crate::error::MarkupError;
use std::borrow::Cow;

/// Current parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Initial state before parsing starts
    Init,
    /// Inside text content between tags
    InsideText,
    /// Inside a markup construct (<...>)
    InsideMarkup,
    /// End of input reached, or an error was recorded
    Done,
}

/// Type of XML token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Empty element: <element/>
    EmptyTag,
    /// Text content
    Text,
    /// CDATA section: <![CDATA[...]]>
    CData,
    /// Comment: <!--...-->
    Comment,
    /// Processing instruction: <?target ...?>
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    /// DOCTYPE declaration
    DocType,
    /// End of file
    Eof,
}

/// A parsed XML token
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in input (start, end)
    pub span: (usize, usize),
    /// For tags and PIs: the name
    pub name: Option<&'a [u8]>,
    /// For start/empty tags: the raw attribute section after the name
    pub attrs: Option<&'a [u8]>,
    /// For text/cdata/comments: the content (owned if entities were decoded)
    pub content: Option<Cow<'a, [u8]>>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            attrs: None,
            content: None,
        }
    }

    fn with_name(mut self, name: &'a [u8]) -> Self {
        self.name = Some(name);
        self
    }

    fn with_attrs(mut self, attrs: &'a [u8]) -> Self {
        self.attrs = Some(attrs);
        self
    }

    fn with_content(mut self, content: Cow<'a, [u8]>) -> Self {
        self.content = Some(content);
        self
    }
}

/// XML tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    state: ParseState,
    error: Option<MarkupError>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            state: ParseState::Init,
            error: None,
        }
    }

    /// The error that stopped tokenizing, if any
    pub fn error(&self) -> Option<&MarkupError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<MarkupError> {
        self.error.take()
    }

    fn fail(&mut self, position: usize, message: &str) -> Option<Token<'a>> {
        if self.error.is_none() {
            self.error = Some(MarkupError::syntax(position, message));
        }
        self.state = ParseState::Done;
        None
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next token, or None at end of input or on error
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.state == ParseState::Done {
            return None;
        }

        if self.state == ParseState::Init {
            self.scanner.skip_whitespace();
            self.state = ParseState::InsideText;
        }

        match self.scanner.peek() {
            Some(b'<') => self.parse_markup(),
            Some(_) => self.parse_text(),
            None => {
                self.state = ParseState::Done;
                let pos = self.scanner.position();
                Some(Token::new(TokenKind::Eof, (pos, pos)))
            }
        }
    }

    /// Parse markup starting with '<'
    fn parse_markup(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();
        self.scanner.advance(1); // Skip '<'
        self.state = ParseState::InsideMarkup;

        match self.scanner.peek() {
            Some(b'/') => self.parse_end_tag(start),
            Some(b'!') => self.parse_bang_markup(start),
            Some(b'?') => self.parse_pi(start),
            Some(_) => self.parse_start_tag(start),
            None => self.fail(start, "Unexpected end of input after '<'"),
        }
    }

    /// Parse a start tag or empty element tag
    fn parse_start_tag(&mut self, start: usize) -> Option<Token<'a>> {
        let Some(name) = self.scanner.read_name() else {
            return self.fail(
                self.scanner.position(),
                "Invalid element name: must start with letter, underscore, or colon",
            );
        };
        let name_end = self.scanner.position();

        let Some(end) = self.scanner.find_tag_end_quoted() else {
            return self.fail(start, "Unterminated start tag");
        };

        let is_empty = self.scanner.slice(name_end, end).last() == Some(&b'/');
        let attrs_end = if is_empty { end - 1 } else { end };
        let attrs = self.scanner.slice(name_end, attrs_end);

        if attrs.first().is_some_and(|&b| !is_whitespace(b)) {
            return self.fail(name_end, "Invalid character in element name");
        }

        self.scanner.set_position(end + 1);
        self.state = ParseState::InsideText;

        let kind = if is_empty { TokenKind::EmptyTag } else { TokenKind::StartTag };
        Some(Token::new(kind, (start, end + 1)).with_name(name).with_attrs(attrs))
    }

    /// Parse an end tag
    fn parse_end_tag(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '/'

        let Some(name) = self.scanner.read_name() else {
            return self.fail(self.scanner.position(), "Invalid element name in end tag");
        };

        self.scanner.skip_whitespace();
        if self.scanner.peek() != Some(b'>') {
            return self.fail(self.scanner.position(), "End tag cannot have attributes or other content");
        }
        self.scanner.advance(1);
        self.state = ParseState::InsideText;

        Some(Token::new(TokenKind::EndTag, (start, self.scanner.position())).with_name(name))
    }

    /// Parse markup starting with '!' (comment, CDATA, DOCTYPE)
    fn parse_bang_markup(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '!'

        if self.scanner.starts_with(b"--") {
            self.scanner.advance(2);
            self.parse_delimited(start, b"-->", TokenKind::Comment)
        } else if self.scanner.starts_with(b"[CDATA[") {
            self.scanner.advance(7);
            self.parse_delimited(start, b"]]>", TokenKind::CData)
        } else if self.scanner.starts_with(b"DOCTYPE") {
            self.parse_doctype(start)
        } else {
            self.fail(start, "Invalid declaration - expected comment, CDATA, or DOCTYPE")
        }
    }

    /// Comments and CDATA: content runs up to a fixed terminator
    fn parse_delimited(&mut self, start: usize, terminator: &[u8], kind: TokenKind) -> Option<Token<'a>> {
        let content_start = self.scanner.position();

        let Some(pos) = self.scanner.find_seq(terminator) else {
            return match kind {
                TokenKind::Comment => self.fail(start, "Unterminated comment"),
                _ => self.fail(start, "Unterminated CDATA section"),
            };
        };

        let content = self.scanner.slice(content_start, pos);
        self.scanner.set_position(pos + terminator.len());
        self.state = ParseState::InsideText;

        Some(Token::new(kind, (start, self.scanner.position())).with_content(Cow::Borrowed(content)))
    }

    /// Skip a DOCTYPE declaration, including any bracketed internal subset
    fn parse_doctype(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(7); // Skip 'DOCTYPE'

        let mut depth = 0usize;
        let mut quote: Option<u8> = None;
        let body_start = self.scanner.position();

        for (i, &b) in self.scanner.remaining().iter().enumerate() {
            match (quote, b) {
                (Some(q), _) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => depth += 1,
                (None, b']') => depth = depth.saturating_sub(1),
                (None, b'>') if depth == 0 => {
                    self.scanner.set_position(body_start + i + 1);
                    self.state = ParseState::InsideText;
                    return Some(Token::new(TokenKind::DocType, (start, self.scanner.position())));
                }
                _ => {}
            }
        }

        self.fail(start, "Unterminated DOCTYPE declaration")
    }

    /// Parse a processing instruction or the XML declaration
    fn parse_pi(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '?'

        let Some(name) = self.scanner.read_name() else {
            return self.fail(self.scanner.position(), "Invalid processing instruction target");
        };
        let content_start = self.scanner.position();

        let Some(pos) = self.scanner.find_seq(b"?>") else {
            return self.fail(start, "Unterminated processing instruction");
        };

        let content = self.scanner.slice(content_start, pos);
        self.scanner.set_position(pos + 2);
        self.state = ParseState::InsideText;

        let kind = if name.eq_ignore_ascii_case(b"xml") {
            TokenKind::XmlDeclaration
        } else {
            TokenKind::ProcessingInstruction
        };
        Some(
            Token::new(kind, (start, self.scanner.position()))
                .with_name(name)
                .with_content(Cow::Borrowed(content)),
        )
    }

    /// Parse text content
    fn parse_text(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();
        self.state = ParseState::InsideText;

        let end = self
            .scanner
            .find_tag_start()
            .unwrap_or(start + self.scanner.remaining().len());

        let content = self.scanner.slice(start, end);
        self.scanner.set_position(end);

        Some(Token::new(TokenKind::Text, (start, end)).with_content(decode_text(content)))
    }
}

/// Iterator adapter for tokenizer
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token()?;
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
