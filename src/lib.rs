//! rustydoc - Shared hierarchical documents with XML and binary codecs
//!
//! A [`Document`] is a cheap, cloneable handle to a tree node carrying a type
//! name, ordered named [`Value`] properties, and ordered children. Clones
//! alias the same node; [`Document::create_copy`] makes an independent deep
//! copy.
//!
//! Layers:
//! - `core` / `reader` / `markup`: XML scanning, tokenizing, and the owned
//!   [`XmlElement`] tree
//! - `dom`: nodes, handles, properties, interned identifiers
//! - `value`: the dynamically typed property value
//! - `codec`: markup and compact binary forms of a document
//!
//! ```
//! use rustydoc::{Document, WriteOptions};
//!
//! let scene = Document::new("scene");
//! scene.set_property("name", "intro").unwrap();
//! scene.append_child(&Document::new("layer")).unwrap();
//!
//! let xml = scene.to_xml_string(&WriteOptions::compact()).unwrap();
//! assert_eq!(xml, r#"<scene name="intro"><layer/></scene>"#);
//!
//! let back = Document::from_bytes(&scene.to_bytes()).unwrap();
//! assert!(back.is_equivalent_to(&scene));
//! ```

pub mod codec;
pub mod core;
pub mod dom;
pub mod error;
pub mod markup;
pub mod reader;
pub mod stream;
pub mod value;

pub use dom::{Children, Document, Identifier, PropertySet, StringPool};
pub use error::{DecodeError, DecodeResult, MarkupError, TreeError, TreeResult};
pub use markup::{ParseOptions, WriteOptions, XmlElement};
pub use value::Value;
