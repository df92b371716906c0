//! Markup Module - parsed XML element trees
//!
//! - `XmlElement`: an owned element tree built from reader events
//! - `ParseOptions` / `WriteOptions`: knobs for reading and writing markup

pub mod element;
pub mod writer;

pub use element::XmlElement;

/// Options for parsing markup into an [`XmlElement`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep text nodes that consist only of whitespace
    pub keep_whitespace_text: bool,
}

/// Options for writing an [`XmlElement`] as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` first
    pub declaration: bool,
    /// Spaces per nesting level; `None` writes everything on one line
    pub indent: Option<usize>,
    pub line_ending: &'static str,
}

impl WriteOptions {
    /// Single line, no declaration
    pub fn compact() -> Self {
        WriteOptions {
            declaration: false,
            indent: None,
            line_ending: "\n",
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            declaration: true,
            indent: Some(2),
            line_ending: "\n",
        }
    }
}
