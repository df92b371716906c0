//! XML Attribute Parsing
//!
//! Parses XML attributes from tag content.

use super::entities::decode_text;
use super::scanner::{is_name_char, is_name_start_char, is_whitespace};
use std::borrow::Cow;

/// A parsed XML attribute
#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    /// Attribute name (may include namespace prefix)
    pub name: Cow<'a, [u8]>,
    /// Attribute value (entities decoded)
    pub value: Cow<'a, [u8]>,
}

impl<'a> Attribute<'a> {
    pub fn new(name: &'a [u8], value: Cow<'a, [u8]>) -> Self {
        Attribute {
            name: Cow::Borrowed(name),
            value,
        }
    }

    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name.as_ref()).ok()
    }

    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(self.value.as_ref()).ok()
    }
}

/// Parse attributes from raw tag content (after the element name)
///
/// Input should be the content between element name and '>' or '/>'.
/// On error returns the message and the offset into `input`.
pub fn parse_attributes(input: &[u8]) -> Result<Vec<Attribute<'_>>, (&'static str, usize)> {
    let mut attrs = Vec::new();
    let mut pos = 0;

    loop {
        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() {
            break;
        }

        let name_start = pos;
        if !is_name_start_char(input[pos]) {
            return Err(("Attribute name must start with letter, underscore, or colon", pos));
        }
        while pos < input.len() && is_name_char(input[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if input.get(pos) != Some(&b'=') {
            return Err(("Attribute value required", pos));
        }
        pos += 1;
        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }

        let quote = match input.get(pos) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => return Err(("Attribute value must be quoted", pos)),
        };
        pos += 1;
        let value_start = pos;

        let Some(len) = memchr::memchr(quote, &input[value_start..]) else {
            return Err(("Attribute value has mismatched quotes", value_start));
        };
        pos = value_start + len;

        let raw = &input[value_start..pos];
        if memchr::memchr(b'<', raw).is_some() {
            return Err(("Attribute value cannot contain '<'", value_start));
        }
        attrs.push(Attribute::new(name, decode_text(raw)));
        pos += 1; // Skip closing quote
    }

    Ok(attrs)
}
