//! Markup form of a document
//!
//! A node becomes an element named after its type. Properties become
//! attributes in order, rendered as text; children become nested elements.
//! On the way back every attribute is read as a string property.

use crate::core::scanner::is_valid_name;
use crate::dom::node::Node;
use crate::dom::{Document, Identifier, PropertySet};
use crate::error::{DecodeError, DecodeResult, MarkupError};
use crate::markup::{WriteOptions, XmlElement};
use crate::value::Value;
use std::sync::Arc;

impl Document {
    /// Element tree for this document, or `None` if it is empty.
    ///
    /// Fails with `MarkupError::InvalidName` when a type or property name
    /// cannot be written as an XML name.
    pub fn to_xml(&self) -> Result<Option<XmlElement>, MarkupError> {
        self.node().map(|node| node_to_element(node)).transpose()
    }

    /// Markup text for this document; empty for an empty document
    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String, MarkupError> {
        Ok(self
            .to_xml()?
            .map(|element| element.to_xml_string(options))
            .unwrap_or_default())
    }

    /// Build a document from an element tree.
    ///
    /// The root must be a tag element. Text nested inside elements is ignored.
    pub fn from_xml(element: &XmlElement) -> DecodeResult<Document> {
        match element.tag_name() {
            Some(tag) if !tag.is_empty() => {}
            _ => return Err(DecodeError::InvalidRootElement),
        }
        element_to_node(element).map(Document::from_node)
    }

    pub fn from_xml_str(input: &str) -> DecodeResult<Document> {
        Self::from_xml_bytes(input.as_bytes())
    }

    /// Parse markup (UTF-8, or UTF-16 with a BOM) into a document
    pub fn from_xml_bytes(input: &[u8]) -> DecodeResult<Document> {
        tracing::debug!(len = input.len(), "decoding document from markup");
        let root = XmlElement::parse(input)?;
        Self::from_xml(&root)
    }
}

fn checked_name(name: &Identifier) -> Result<&str, MarkupError> {
    let name = name.as_str();
    if is_valid_name(name.as_bytes()) {
        Ok(name)
    } else {
        Err(MarkupError::InvalidName { name: name.to_string() })
    }
}

/// An element with its attributes, and the node children still to convert
type OpenElement = (XmlElement, std::vec::IntoIter<Arc<Node>>);

fn open_element(node: &Node) -> Result<OpenElement, MarkupError> {
    let mut element = XmlElement::new(checked_name(node.ty())?);
    for (name, value) in node.properties().iter() {
        element.set_attribute(checked_name(name)?, value.to_text());
    }
    Ok((element, node.children_snapshot().into_iter()))
}

fn node_to_element(root: &Node) -> Result<XmlElement, MarkupError> {
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut current = open_element(root)?;

    loop {
        if let Some(child) = current.1.next() {
            let opened = open_element(&child)?;
            stack.push(std::mem::replace(&mut current, opened));
            continue;
        }
        match stack.pop() {
            Some(mut parent) => {
                parent.0.add_child(current.0);
                current = parent;
            }
            None => return Ok(current.0),
        }
    }
}

fn node_from_element(element: &XmlElement) -> DecodeResult<Arc<Node>> {
    let ty = element.tag_name().unwrap_or_default();

    let mut properties = PropertySet::with_capacity(element.num_attributes());
    for (index, (name, value)) in element.attributes().enumerate() {
        if name.is_empty() {
            return Err(DecodeError::MalformedProperty { index });
        }
        properties.set(Identifier::from(name), Value::from(value));
    }

    let node = Node::with_properties(Identifier::from(ty), properties);
    node.reserve_children(element.num_children());
    Ok(node)
}

fn element_to_node(root: &XmlElement) -> DecodeResult<Arc<Node>> {
    let top = node_from_element(root)?;
    let mut pending = vec![(top.clone(), root)];

    while let Some((node, element)) = pending.pop() {
        for child in element.children() {
            match child.tag_name() {
                Some(tag) if !tag.is_empty() => {
                    let child_node = node_from_element(child)?;
                    node.adopt(child_node.clone());
                    pending.push((child_node, child));
                }
                _ => tracing::trace!(parent = %node.ty(), "skipping text inside element"),
            }
        }
    }
    Ok(top)
}
