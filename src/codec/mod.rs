//! Document codecs
//!
//! - `binary`: compact depth-first byte form (`to_bytes`, `read_from`, ...)
//! - `xml`: element form (`to_xml`, `from_xml`, ...)
//!
//! Both are implemented as inherent methods on [`Document`](crate::Document).

mod binary;
mod xml;
