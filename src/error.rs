//! Error types
//!
//! - `TreeError`: misuse of the document API (contract violations)
//! - `DecodeError`: malformed binary or markup input
//! - `MarkupError`: XML syntax problems, with byte positions

use thiserror::Error;

pub type TreeResult<T> = Result<T, TreeError>;
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A structural operation was refused. The tree is left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("operation on an empty document")]
    InvalidHandle,

    #[error("document type must not be empty")]
    EmptyType,

    #[error("property name must not be empty")]
    EmptyPropertyName,

    #[error("a node cannot be added as its own child")]
    SelfAttach,

    #[error("child is an ancestor of the target; adding it would create a cycle")]
    WouldCreateCycle,

    #[error("child already has a parent; remove it from that parent first")]
    AlreadyAttached,
}

/// XML syntax error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("syntax error at {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("unexpected end of input, <{open}> is not closed")]
    UnexpectedEof { open: String },

    #[error("end tag </{found}> does not match <{expected}>")]
    MismatchedEndTag { expected: String, found: String },

    #[error("end tag </{found}> has no matching start tag")]
    UnexpectedEndTag { found: String },

    #[error("input has no root element")]
    NoRootElement,

    #[error("content after the root element")]
    TrailingContent,

    #[error("invalid text encoding: {0}")]
    Encoding(String),

    #[error("{name:?} is not a valid XML name")]
    InvalidName { name: String },
}

impl MarkupError {
    pub fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }
}

/// Failure to decode a document from markup or a binary stream
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("property {index} has an empty name")]
    MalformedProperty { index: usize },

    #[error("root element is a text element, not a tag")]
    InvalidRootElement,

    #[error("stream ended in the middle of a node")]
    TruncatedStream,

    #[error("compressed integer header declares {size} bytes")]
    InvalidCompressedInt { size: u8 },

    #[error("negative count or length in stream")]
    NegativeCount,

    #[error("string in stream is not valid UTF-8")]
    InvalidUtf8,

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error(transparent)]
    Io(std::io::Error),
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            DecodeError::TruncatedStream
        } else {
            DecodeError::Io(err)
        }
    }
}
