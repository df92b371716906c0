//! Markup output
//!
//! Elements whose children are all tags are laid out one child per line when
//! indenting. Elements holding text keep their content on one line so that
//! no whitespace is added to character data.

use super::element::XmlElement;
use super::WriteOptions;
use crate::core::entities::{encode_attribute, encode_text};
use std::fmt::{self, Write};

impl XmlElement {
    /// Serialize this element (and its subtree) to a string
    pub fn to_xml_string(&self, options: &WriteOptions) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_xml(&mut out, options);
        out
    }

    /// Serialize into any `fmt::Write` sink
    pub fn write_xml<W: Write + ?Sized>(&self, out: &mut W, options: &WriteOptions) -> fmt::Result {
        if options.declaration {
            out.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
            out.write_str(options.line_ending)?;
        }
        self.write_element(out, options, 0)?;
        if options.indent.is_some() {
            out.write_str(options.line_ending)?;
        }
        Ok(())
    }

    fn write_element<W: Write + ?Sized>(&self, out: &mut W, options: &WriteOptions, depth: usize) -> fmt::Result {
        let mut stack: Vec<OpenTag<'_>> = Vec::new();
        if let Some(open) = open_tag(self, out, options, depth)? {
            stack.push(open);
        }

        while let Some(open) = stack.last_mut() {
            let element = open.element;
            match element.children().get(open.next) {
                Some(child) => {
                    open.next += 1;
                    let depth = open.depth + 1;
                    if let Some(width) = open.block {
                        out.write_str(options.line_ending)?;
                        write_indent(out, width * depth)?;
                    }
                    if let Some(child_open) = open_tag(child, out, options, depth)? {
                        stack.push(child_open);
                    }
                }
                None => {
                    if let Some(width) = open.block {
                        out.write_str(options.line_ending)?;
                        write_indent(out, width * open.depth)?;
                    }
                    write!(out, "</{}>", element.tag_name().unwrap_or_default())?;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}

/// An element whose start tag is written and whose children are in progress
struct OpenTag<'a> {
    element: &'a XmlElement,
    depth: usize,
    next: usize,
    /// Indent width when children go one per line
    block: Option<usize>,
}

/// Write a text node, a self-closing tag, or a start tag left open
fn open_tag<'a, W: Write + ?Sized>(
    element: &'a XmlElement,
    out: &mut W,
    options: &WriteOptions,
    depth: usize,
) -> Result<Option<OpenTag<'a>>, fmt::Error> {
    let Some(tag) = element.tag_name() else {
        out.write_str(&encode_text(element.text_content().unwrap_or_default()))?;
        return Ok(None);
    };

    write!(out, "<{tag}")?;
    for (name, value) in element.attributes() {
        write!(out, " {name}=\"{}\"", encode_attribute(value))?;
    }

    if element.children().is_empty() {
        out.write_str("/>")?;
        return Ok(None);
    }
    out.write_char('>')?;

    let block = options.indent.filter(|_| element.children().iter().all(|c| !c.is_text_element()));
    Ok(Some(OpenTag {
        element,
        depth,
        next: 0,
        block,
    }))
}

fn write_indent<W: Write + ?Sized>(out: &mut W, spaces: usize) -> fmt::Result {
    write!(out, "{:spaces$}", "")
}

/// Compact single-line form without a declaration
impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_element(f, &WriteOptions::compact(), 0)
    }
}
