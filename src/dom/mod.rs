//! DOM Module - shared document tree
//!
//! - `Node`: reference-counted tree node with a weak parent link
//! - `Document`: cheap, cloneable handle that aliases a node
//! - `PropertySet`: ordered, unique-keyed property storage
//! - `StringPool` / `Identifier`: interned names for types and properties

pub mod document;
pub(crate) mod node;
pub mod properties;
pub mod strings;

pub use document::{Children, Document};
pub use properties::PropertySet;
pub use strings::{Identifier, StringPool};
