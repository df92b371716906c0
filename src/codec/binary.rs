//! Binary document form
//!
//! Per node, depth first with the parent before its children: type string,
//! property count, each property as name string plus encoded value, child
//! count, then each child. An empty type string stands for "no node".

use crate::dom::node::Node;
use crate::dom::{Document, Identifier, PropertySet};
use crate::error::{DecodeError, DecodeResult};
use crate::stream::{ReadExt, WriteExt};
use crate::value::Value;
use std::io::{self, Read, Write};
use std::sync::Arc;

/// Upper bound on storage reserved from a count read off the stream
const MAX_PREALLOC: usize = 1024;

impl Document {
    /// Encode this document (and its whole subtree) into a byte vector
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut out);
        out
    }

    /// Encode this document into `output`
    pub fn write_to<W: Write + ?Sized>(&self, output: &mut W) -> io::Result<()> {
        match self.node() {
            Some(node) => write_tree(node, output),
            None => {
                output.write_string("")?;
                output.write_compressed_int(0)?;
                output.write_compressed_int(0)
            }
        }
    }

    /// Decode a document from a byte slice
    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Document> {
        let mut input = bytes;
        Self::read_from(&mut input)
    }

    /// Decode a document from `input`.
    ///
    /// A stream that ends before the root's type yields an empty document.
    /// A child cut off by the end of the stream ends decoding of its parent,
    /// which keeps the children read before it. Nesting depth is bounded
    /// only by the input; no recursion is involved.
    pub fn read_from<R: Read + ?Sized>(input: &mut R) -> DecodeResult<Document> {
        tracing::debug!("decoding document from binary stream");
        Ok(read_tree(input)?.map(Document::from_node).unwrap_or_default())
    }
}

/// Pre-order walk with an explicit stack; children pushed in reverse
fn write_tree<W: Write + ?Sized>(root: &Arc<Node>, output: &mut W) -> io::Result<()> {
    let mut pending = vec![root.clone()];

    while let Some(node) = pending.pop() {
        // Snapshot so no lock is held while `output` runs
        let properties = node.properties().clone();
        let children = node.children_snapshot();

        output.write_string(node.ty().as_str())?;

        output.write_len(properties.len())?;
        for (name, value) in properties.iter() {
            output.write_string(name.as_str())?;
            value.write_to(output)?;
        }

        output.write_len(children.len())?;
        pending.extend(children.into_iter().rev());
    }
    Ok(())
}

/// A node whose children are still being read
struct OpenNode {
    node: Arc<Node>,
    next: usize,
    expected: usize,
}

fn read_tree<R: Read + ?Sized>(input: &mut R) -> DecodeResult<Option<Arc<Node>>> {
    let Some((root, expected)) = read_header(input)? else {
        return Ok(None);
    };

    let mut stack = vec![OpenNode {
        node: root.clone(),
        next: 0,
        expected,
    }];

    while let Some(open) = stack.last_mut() {
        if open.next == open.expected {
            stack.pop();
            continue;
        }
        let index = open.next;
        open.next += 1;

        match read_header(input) {
            Ok(Some((child, expected))) => {
                open.node.adopt(child.clone());
                stack.push(OpenNode {
                    node: child,
                    next: 0,
                    expected,
                });
            }
            Ok(None) => {
                tracing::debug!(parent = %open.node.ty(), index, expected = open.expected, "empty child ends decoding");
                stack.pop();
            }
            Err(DecodeError::TruncatedStream) => {
                tracing::debug!(parent = %open.node.ty(), index, expected = open.expected, "stream ended inside child");
                stack.pop();
            }
            Err(err) => return Err(err),
        }
    }

    Ok(Some(root))
}

/// Type, properties and child count of one node; `None` for an empty node
fn read_header<R: Read + ?Sized>(input: &mut R) -> DecodeResult<Option<(Arc<Node>, usize)>> {
    let Some(ty) = input.read_string_opt()? else {
        return Ok(None);
    };

    if ty.is_empty() {
        skip_empty_counts(input)?;
        return Ok(None);
    }

    let num_properties = input.read_count()?;
    let mut properties = PropertySet::with_capacity(num_properties.min(MAX_PREALLOC));
    for index in 0..num_properties {
        let name = input.read_string()?;
        if name.is_empty() {
            return Err(DecodeError::MalformedProperty { index });
        }
        let value = Value::read_from(input)?;
        properties.set(Identifier::from(name), value);
    }

    let node = Node::with_properties(Identifier::from(ty), properties);

    let num_children = input.read_count()?;
    node.reserve_children(num_children.min(MAX_PREALLOC));
    Ok(Some((node, num_children)))
}

/// An empty node is followed by two zero counts; tolerate their absence
fn skip_empty_counts<R: Read + ?Sized>(input: &mut R) -> DecodeResult<()> {
    for _ in 0..2 {
        match input.read_compressed_int() {
            Ok(_) => {}
            Err(DecodeError::TruncatedStream) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
