//! Owned XML element tree
//!
//! An [`XmlElement`] is either a tag element (name, ordered attributes,
//! children) or a text element holding character data.

use super::ParseOptions;
use crate::core::encoding::convert_to_utf8;
use crate::error::MarkupError;
use crate::reader::{SliceReader, StartElement, XmlEvent};

/// A parsed XML element or text node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// `None` for text elements
    tag: Option<String>,
    text: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create a tag element with no attributes or children
    pub fn new(tag: impl Into<String>) -> Self {
        XmlElement {
            tag: Some(tag.into()),
            text: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a text element
    pub fn text(content: impl Into<String>) -> Self {
        XmlElement {
            tag: None,
            text: content.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is_text_element(&self) -> bool {
        self.tag.is_none()
    }

    /// Tag name, or `None` for a text element
    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn has_tag_name(&self, name: &str) -> bool {
        self.tag.as_deref() == Some(name)
    }

    /// Character data of a text element, or `None` for a tag element
    pub fn text_content(&self) -> Option<&str> {
        self.is_text_element().then_some(self.text.as_str())
    }

    /// Concatenated text of this element and all its descendants
    pub fn all_text(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![self];
        while let Some(element) = pending.pop() {
            if element.is_text_element() {
                out.push_str(&element.text);
            }
            pending.extend(element.children.iter().rev());
        }
        out
    }

    // --- attributes -------------------------------------------------------

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }

    /// Set an attribute, replacing an existing value in place.
    /// Ignored on text elements.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if self.is_text_element() {
            return;
        }
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(n, _)| n == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Attributes in document order
    pub fn attributes(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    // --- children ---------------------------------------------------------

    /// Append a child. Ignored on text elements.
    pub fn add_child(&mut self, child: XmlElement) {
        if !self.is_text_element() {
            self.children.push(child);
        }
    }

    /// Insert a child at the front. Ignored on text elements.
    pub fn prepend_child(&mut self, child: XmlElement) {
        if !self.is_text_element() {
            self.children.insert(0, child);
        }
    }

    /// All children, text elements included
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Child tag elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> + '_ {
        self.children.iter().filter(|c| !c.is_text_element())
    }

    pub fn child_with_tag_name(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|c| c.has_tag_name(name))
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Append character data, merging with a trailing text child
    fn push_text(&mut self, text: &str) {
        match self.children.last_mut() {
            Some(last) if last.is_text_element() => last.text.push_str(text),
            _ => self.children.push(XmlElement::text(text)),
        }
    }

    // --- parsing ----------------------------------------------------------

    /// Parse markup bytes (UTF-8, or UTF-16 with a BOM) with default options
    pub fn parse(input: &[u8]) -> Result<Self, MarkupError> {
        Self::parse_with(input, &ParseOptions::default())
    }

    pub fn parse_str(input: &str) -> Result<Self, MarkupError> {
        Self::parse_with(input.as_bytes(), &ParseOptions::default())
    }

    /// Parse markup bytes into the root element
    pub fn parse_with(input: &[u8], options: &ParseOptions) -> Result<Self, MarkupError> {
        let converted = convert_to_utf8(input)?;
        if let Err(e) = std::str::from_utf8(&converted) {
            return Err(MarkupError::Encoding(format!(
                "invalid UTF-8 at byte {}",
                e.valid_up_to()
            )));
        }

        let root = build_from_events(SliceReader::new(&converted), options)?;
        tracing::trace!(
            tag = root.tag_name().unwrap_or_default(),
            children = root.num_children(),
            "parsed markup"
        );
        Ok(root)
    }
}

impl Drop for XmlElement {
    /// Flattens the subtree onto a work list so deep trees drop in a loop
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// Build an element tree from reader events
///
/// Tracks open elements on a stack; end tags must match the innermost open
/// element. Exactly one root element is allowed.
fn build_from_events(mut reader: SliceReader<'_>, options: &ParseOptions) -> Result<XmlElement, MarkupError> {
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let Some(event) = reader.next_event() else {
            return Err(reader.take_error().unwrap_or(MarkupError::NoRootElement));
        };

        match event {
            XmlEvent::StartElement(start) => {
                if root.is_some() {
                    return Err(MarkupError::TrailingContent);
                }
                stack.push(element_from_start(&start));
            }

            XmlEvent::EmptyElement(start) => {
                if root.is_some() {
                    return Err(MarkupError::TrailingContent);
                }
                let element = element_from_start(&start);
                match stack.last_mut() {
                    Some(parent) => parent.add_child(element),
                    None => root = Some(element),
                }
            }

            XmlEvent::EndElement(end) => {
                let found = utf8(end.name);
                let Some(element) = stack.pop() else {
                    return Err(MarkupError::UnexpectedEndTag { found });
                };
                let expected = element.tag_name().unwrap_or_default();
                if expected != found {
                    return Err(MarkupError::MismatchedEndTag {
                        expected: expected.to_string(),
                        found,
                    });
                }
                match stack.last_mut() {
                    Some(parent) => parent.add_child(element),
                    None => root = Some(element),
                }
            }

            XmlEvent::Text(content) => {
                let whitespace_only = content.iter().all(|b| b.is_ascii_whitespace());
                match stack.last_mut() {
                    Some(parent) => {
                        if !whitespace_only || options.keep_whitespace_text {
                            parent.push_text(&utf8(&content));
                        }
                    }
                    None if whitespace_only => {}
                    None if root.is_some() => return Err(MarkupError::TrailingContent),
                    None => return Err(MarkupError::NoRootElement),
                }
            }

            XmlEvent::CData(content) => match stack.last_mut() {
                Some(parent) => parent.push_text(&utf8(&content)),
                None if root.is_some() => return Err(MarkupError::TrailingContent),
                None => return Err(MarkupError::NoRootElement),
            },

            XmlEvent::EndDocument => {
                if let Some(open) = stack.last() {
                    return Err(MarkupError::UnexpectedEof {
                        open: open.tag_name().unwrap_or_default().to_string(),
                    });
                }
                return root.ok_or(MarkupError::NoRootElement);
            }
        }
    }
}

fn element_from_start(start: &StartElement<'_>) -> XmlElement {
    let mut element = XmlElement::new(utf8(start.name));
    for attr in &start.attributes {
        element.set_attribute(utf8(&attr.name), utf8(&attr.value));
    }
    element
}

// Input is validated as UTF-8 before tokenizing, and entity decoding only
// produces UTF-8, so this never substitutes.
fn utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
